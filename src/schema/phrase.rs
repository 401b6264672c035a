//! Structural setters for phrase and coordination specifications.
//!
//! These take finished elements. Turning text into elements needs a lexicon
//! and lives in the factory.

use super::category::PhraseCategory;
use super::element::{CoordinatedPhrase, Element, HasFeatures, PhraseElement};
use super::features::{
    ClauseStatus, DiscourseFunction, Feature, FeatureValue, Gender, NumberAgreement, Person,
};

impl PhraseElement {
    /// Set the head. A noun phrase takes its agreement features from it.
    pub fn set_head(&mut self, head: Element) {
        if self.category == PhraseCategory::NounPhrase {
            self.copy_noun_features(&head);
        }
        self.head = Some(Box::new(head));
    }

    fn copy_noun_features(&mut self, noun: &Element) {
        self.set(Feature::Possessive, noun.flag(Feature::Possessive));
        self.set(Feature::Raised, false);
        self.set(Feature::Acronym, false);
        let number = noun.feature(Feature::Number).cloned();
        self.set_feature(
            Feature::Number,
            number.unwrap_or(FeatureValue::Number(NumberAgreement::Singular)),
        );
        let person = noun.feature(Feature::Person).cloned();
        self.set_feature(
            Feature::Person,
            person.unwrap_or(FeatureValue::Person(Person::Third)),
        );
        let gender = noun.feature(Feature::Gender).cloned();
        self.set_feature(
            Feature::Gender,
            gender.unwrap_or(FeatureValue::Gender(Gender::Neuter)),
        );
        if let Some(expletive) = noun.feature(Feature::ExpletiveSubject).cloned() {
            self.set_feature(Feature::ExpletiveSubject, expletive);
        }
        self.set(Feature::AdjectiveOrdering, true);
    }

    pub fn set_verb_phrase(&mut self, verb_phrase: Element) {
        self.verb_phrase = Some(Box::new(verb_phrase));
    }

    /// The clause's verb phrase when it is a plain verb phrase.
    fn routed_verb_phrase(&mut self) -> Option<&mut PhraseElement> {
        if !self.is_clause() {
            return None;
        }
        match self.verb_phrase.as_deref_mut() {
            Some(Element::Phrase(vp)) if vp.category == PhraseCategory::VerbPhrase => Some(vp),
            _ => None,
        }
    }

    /// Add a complement. Without a function it becomes an object; clauses and
    /// coordinations become subordinate. On a clause the complement goes to
    /// the verb phrase.
    pub fn add_complement(&mut self, mut complement: Element) {
        if let Some(vp) = self.routed_verb_phrase() {
            vp.add_complement(complement);
            return;
        }
        if !complement.has(Feature::DiscourseFunction) {
            complement.set_function(DiscourseFunction::Object);
        }
        if complement.is_phrase(PhraseCategory::Clause)
            || matches!(complement, Element::Coordinated(_))
        {
            complement.set(Feature::ClauseStatus, ClauseStatus::Subordinate);
        }
        self.complements.push(complement);
    }

    /// Replace every complement sharing this complement's function.
    pub fn set_complement(&mut self, complement: Element) {
        if let Some(vp) = self.routed_verb_phrase() {
            vp.set_complement(complement);
            return;
        }
        self.remove_complements(complement.function());
        self.add_complement(complement);
    }

    pub fn remove_complements(&mut self, function: Option<DiscourseFunction>) {
        let Some(function) = function else {
            return;
        };
        self.complements.retain(|c| c.function() != Some(function));
    }

    pub fn clear_complements(&mut self) {
        self.complements.clear();
    }

    /// The first complement with the object function.
    pub fn object(&self) -> Option<&Element> {
        let holder = match self.verb_phrase.as_deref() {
            Some(Element::Phrase(vp)) if self.is_clause() => vp,
            _ => self,
        };
        holder
            .complements
            .iter()
            .find(|c| c.function() == Some(DiscourseFunction::Object))
    }

    pub fn indirect_object(&self) -> Option<&Element> {
        let holder = match self.verb_phrase.as_deref() {
            Some(Element::Phrase(vp)) if self.is_clause() => vp,
            _ => self,
        };
        holder
            .complements
            .iter()
            .find(|c| c.function() == Some(DiscourseFunction::IndirectObject))
    }

    /// Set the object. Prepositional phrases collect objects; other phrases
    /// replace the previous one.
    pub fn set_object(&mut self, mut object: Element) {
        object.set_function(DiscourseFunction::Object);
        if self.category == PhraseCategory::PrepositionalPhrase {
            self.add_complement(object);
        } else {
            self.set_complement(object);
        }
    }

    pub fn set_indirect_object(&mut self, mut object: Element) {
        object.set_function(DiscourseFunction::IndirectObject);
        self.set_complement(object);
    }

    pub fn set_subject(&mut self, subject: Element) {
        self.subjects = vec![subject];
    }

    pub fn add_subject(&mut self, subject: Element) {
        self.subjects.push(subject);
    }

    pub fn set_specifier(&mut self, mut specifier: Element) {
        specifier.set_function(DiscourseFunction::Specifier);
        self.specifier = Some(Box::new(specifier));
    }

    /// Clauses hand premodifiers to their verb phrase.
    pub fn add_pre_modifier(&mut self, modifier: Element) {
        if self.is_clause() {
            match self.verb_phrase.as_deref_mut() {
                Some(Element::Phrase(vp)) => return vp.add_pre_modifier(modifier),
                Some(Element::Coordinated(vp)) => return vp.add_pre_modifier(modifier),
                _ => {}
            }
        }
        self.premodifiers.push(modifier);
    }

    pub fn add_post_modifier(&mut self, mut modifier: Element) {
        modifier.set_function(DiscourseFunction::PostModifier);
        self.postmodifiers.push(modifier);
    }

    pub fn add_front_modifier(&mut self, modifier: Element) {
        self.front_modifiers.push(modifier);
    }

    pub fn set_pre_modifier(&mut self, modifier: Element) {
        self.premodifiers.clear();
        self.add_pre_modifier(modifier);
    }

    pub fn set_post_modifier(&mut self, modifier: Element) {
        self.postmodifiers.clear();
        self.add_post_modifier(modifier);
    }

    pub fn set_front_modifier(&mut self, modifier: Element) {
        self.front_modifiers.clear();
        self.add_front_modifier(modifier);
    }

    pub fn set_cue_phrase(&mut self, cue: Element) {
        self.cue_phrase = Some(Box::new(cue));
    }
}

impl CoordinatedPhrase {
    /// Clause coordinates after the first lose their complementiser.
    pub fn add_coordinate(&mut self, mut coordinate: Element) {
        if coordinate.is_phrase(PhraseCategory::Clause) && !self.coordinates.is_empty() {
            coordinate.set(Feature::SuppressedComplementiser, true);
        }
        self.coordinates.push(coordinate);
    }

    pub fn set_conjunction(&mut self, conjunction: impl Into<String>) {
        self.conjunction = Some(conjunction.into());
    }

    pub fn last_coordinate(&self) -> Option<&Element> {
        self.coordinates.last()
    }

    pub fn add_pre_modifier(&mut self, modifier: Element) {
        self.premodifiers.push(modifier);
    }

    pub fn add_post_modifier(&mut self, modifier: Element) {
        self.postmodifiers.push(modifier);
    }

    pub fn add_complement(&mut self, complement: Element) {
        self.complements.push(complement);
    }

    pub fn clear_coordinates(&mut self) {
        self.coordinates.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::category::LexicalCategory;
    use crate::schema::element::WordElement;

    fn clause() -> PhraseElement {
        let mut clause = PhraseElement::new(PhraseCategory::Clause);
        clause.set_verb_phrase(PhraseElement::new(PhraseCategory::VerbPhrase).into());
        clause
    }

    #[test]
    fn noun_head_sets_agreement_defaults() {
        let mut np = PhraseElement::new(PhraseCategory::NounPhrase);
        let mut head = WordElement::new("she", LexicalCategory::Pronoun);
        head.set(Feature::Gender, Gender::Feminine);
        np.set_head(head.into());
        assert_eq!(np.number(), Some(NumberAgreement::Singular));
        assert_eq!(np.person(), Some(Person::Third));
        assert_eq!(np.gender(), Some(Gender::Feminine));
        assert!(np.flag(Feature::AdjectiveOrdering));
        assert!(!np.flag(Feature::Possessive));
    }

    #[test]
    fn clause_complements_go_to_the_verb_phrase() {
        let mut clause = clause();
        clause.add_complement(Element::canned("the man"));
        assert!(clause.complements.is_empty());
        let object = clause.object().unwrap();
        assert_eq!(object.function(), Some(DiscourseFunction::Object));
    }

    #[test]
    fn setting_an_object_replaces_the_old_one() {
        let mut vp = PhraseElement::new(PhraseCategory::VerbPhrase);
        vp.set_object(Element::canned("the cat"));
        vp.set_indirect_object(Element::canned("the boy"));
        vp.set_object(Element::canned("the dog"));
        assert_eq!(vp.complements.len(), 2);
        assert_eq!(vp.object().unwrap().realisation(), "the dog");
        assert_eq!(vp.indirect_object().unwrap().realisation(), "the boy");
    }

    #[test]
    fn prepositions_collect_objects() {
        let mut pp = PhraseElement::new(PhraseCategory::PrepositionalPhrase);
        pp.set_object(Element::canned("the rock"));
        pp.set_object(Element::canned("the tree"));
        assert_eq!(pp.complements.len(), 2);
    }

    #[test]
    fn clause_complements_become_subordinate() {
        let mut vp = PhraseElement::new(PhraseCategory::VerbPhrase);
        vp.add_complement(clause().into());
        assert_eq!(vp.complements[0].clause_status(), Some(ClauseStatus::Subordinate));
    }

    #[test]
    fn later_clause_coordinates_lose_complementiser() {
        let mut coord = CoordinatedPhrase::new(Vec::new());
        coord.add_coordinate(clause().into());
        coord.add_coordinate(clause().into());
        assert!(!coord.coordinates[0].flag(Feature::SuppressedComplementiser));
        assert!(coord.coordinates[1].flag(Feature::SuppressedComplementiser));
    }
}

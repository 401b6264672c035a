//! Coordinated phrases. Shared features are pushed down to every
//! coordinate, conjunctions are interleaved, and a common specifier can be
//! raised so it is only said once.

use super::phrase::realise_list;
use super::SyntaxProcessor;
use crate::schema::category::{LexicalCategory, PhraseCategory};
use crate::schema::element::{CoordinatedPhrase, Element, HasFeatures, InflectedWord};
use crate::schema::features::{DiscourseFunction, Feature};

/// Features a coordination hands to each coordinate when it has them.
const SHARED_FEATURES: [Feature; 10] = [
    Feature::Progressive,
    Feature::Perfect,
    Feature::Gender,
    Feature::Number,
    Feature::Tense,
    Feature::Person,
    Feature::Negated,
    Feature::Modal,
    Feature::DiscourseFunction,
    Feature::Form,
];

pub(super) fn realise(syntax: &SyntaxProcessor<'_>, mut phrase: CoordinatedPhrase) -> Element {
    let mut out = Vec::new();
    realise_list(
        syntax,
        &mut out,
        std::mem::take(&mut phrase.premodifiers),
        DiscourseFunction::PreModifier,
    );

    let mut coordinated = CoordinatedPhrase::new(Vec::new());
    coordinated.conjunction = phrase.conjunction.clone();
    coordinated.set_opt(
        Feature::ConjunctionType,
        phrase.feature(Feature::ConjunctionType).cloned(),
    );

    let mut children = std::mem::take(&mut phrase.coordinates);
    if !children.is_empty() {
        if phrase.flag(Feature::RaiseSpecifier) {
            raise_specifier(&mut children);
        }
        let possessive = phrase.feature(Feature::Possessive).cloned();
        if let Some(last) = children.last_mut() {
            last.set_opt(Feature::Possessive, possessive);
        }
        let conjunction = phrase.conjunction.clone().filter(|c| !c.is_empty());
        for (index, mut child) in children.into_iter().enumerate() {
            set_child_features(&phrase, &mut child);
            if index > 0 {
                if phrase.flag(Feature::AggregateAuxiliary) {
                    child.set(Feature::RealiseAuxiliary, false);
                }
                if child.is_phrase(PhraseCategory::Clause) {
                    child.set_opt(
                        Feature::SuppressedComplementiser,
                        phrase.feature(Feature::SuppressedComplementiser).cloned(),
                    );
                }
                if let Some(conjunction) = &conjunction {
                    let mut word = InflectedWord::new(conjunction.as_str(), LexicalCategory::Conjunction);
                    word.set_function(DiscourseFunction::Conjunction);
                    coordinated.coordinates.push(word.into());
                }
            }
            if let Some(realised) = syntax.realise(child) {
                coordinated.coordinates.push(realised);
            }
        }
        out.push(coordinated.into());
    }

    realise_list(
        syntax,
        &mut out,
        std::mem::take(&mut phrase.postmodifiers),
        DiscourseFunction::PostModifier,
    );
    realise_list(
        syntax,
        &mut out,
        std::mem::take(&mut phrase.complements),
        DiscourseFunction::Complement,
    );
    Element::list(out)
}

fn set_child_features(phrase: &CoordinatedPhrase, child: &mut Element) {
    for key in SHARED_FEATURES {
        if let Some(value) = phrase.feature(key) {
            child.set_feature(key, value.clone());
        }
    }
    if let Some(status) = phrase.feature(Feature::ClauseStatus) {
        child.set_feature(Feature::ClauseStatus, status.clone());
    }
    if let (Some(specifier), Element::Phrase(inner)) = (phrase.specifier.as_deref(), &mut *child) {
        inner.specifier = Some(Box::new(specifier.clone()));
    }
    if phrase.has(Feature::InterrogativeType) {
        child.set(Feature::IgnoreModal, true);
    }
}

fn specifier_base(child: &Element) -> Option<&str> {
    let Element::Phrase(phrase) = child else {
        return None;
    };
    phrase.specifier.as_deref().and_then(Element::base_form)
}

/// Mark every coordinate after the first as raised when all of them share
/// the first coordinate's specifier.
fn raise_specifier(children: &mut [Element]) {
    let Some(first) = children.first().and_then(specifier_base) else {
        return;
    };
    let first = first.to_string();
    let all_match = children[1..]
        .iter()
        .all(|child| specifier_base(child) == Some(first.as_str()));
    if all_match {
        for child in &mut children[1..] {
            child.set(Feature::Raised, true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::factory::NlgFactory;
    use crate::core::lexicon::MemoryLexicon;

    fn coordinates(element: Element) -> Vec<Element> {
        match element {
            Element::Coordinated(c) => c.coordinates,
            other => panic!("expected a coordination, got {other:?}"),
        }
    }

    #[test]
    fn conjunctions_are_interleaved() {
        let lexicon = MemoryLexicon::english().unwrap();
        let factory = NlgFactory::new(lexicon.as_ref());
        let syntax = SyntaxProcessor::new(lexicon.as_ref());
        let mut coord = factory.create_coordinated_phrase("apples", "pears");
        factory.add_coordinate(&mut coord, "plums");
        let parts = coordinates(syntax.realise(coord.into()).unwrap());
        assert_eq!(parts.len(), 5);
        assert_eq!(parts[1].base_form(), Some("and"));
        assert_eq!(parts[1].function(), Some(DiscourseFunction::Conjunction));
        assert_eq!(parts[3].base_form(), Some("and"));
    }

    #[test]
    fn empty_conjunction_is_skipped() {
        let lexicon = MemoryLexicon::english().unwrap();
        let factory = NlgFactory::new(lexicon.as_ref());
        let syntax = SyntaxProcessor::new(lexicon.as_ref());
        let mut coord = factory.create_coordinated_phrase("apples", "pears");
        coord.set_conjunction("");
        assert_eq!(coordinates(syntax.realise(coord.into()).unwrap()).len(), 2);
    }

    #[test]
    fn shared_specifier_is_raised() {
        let lexicon = MemoryLexicon::english().unwrap();
        let factory = NlgFactory::new(lexicon.as_ref());
        let mut children: Vec<Element> = vec![
            factory.create_noun_phrase("the", "dog").into(),
            factory.create_noun_phrase("the", "cat").into(),
        ];
        raise_specifier(&mut children);
        assert!(!children[0].flag(Feature::Raised));
        assert!(children[1].flag(Feature::Raised));

        let mut mixed: Vec<Element> = vec![
            factory.create_noun_phrase("the", "dog").into(),
            factory.create_noun_phrase("a", "cat").into(),
        ];
        raise_specifier(&mut mixed);
        assert!(!mixed[1].flag(Feature::Raised));
    }

    #[test]
    fn children_inherit_the_discourse_function() {
        let lexicon = MemoryLexicon::english().unwrap();
        let factory = NlgFactory::new(lexicon.as_ref());
        let mut coord = factory.create_coordinated_phrase("he", "she");
        coord.set_function(DiscourseFunction::Object);
        let mut child = coord.coordinates[0].clone();
        set_child_features(&coord, &mut child);
        assert_eq!(child.function(), Some(DiscourseFunction::Object));
    }
}

//! Clauses. Agreement is settled between subject and verb first; then the
//! clause is laid out as complementiser, cue phrase, front modifiers or
//! question words, subjects, verb phrase, passive agent and trailing
//! question material.

use super::phrase::{is_expletive_subject, realise_list};
use super::verb_phrase::{is_copular, phrase_is_copular};
use super::SyntaxProcessor;
use crate::schema::category::{LexicalCategory, PhraseCategory};
use crate::schema::element::{Element, HasFeatures, PhraseElement};
use crate::schema::features::{
    ClauseStatus, DiscourseFunction, Feature, FeatureValue, Form, InterrogativeType,
    NumberAgreement, Person, Tense,
};

pub(super) fn realise(syntax: &SyntaxProcessor<'_>, mut phrase: PhraseElement) -> Element {
    let mut out = Vec::new();
    check_subject_number_person(&mut phrase);
    check_discourse_function(&mut phrase);
    copy_front_modifiers(&mut phrase);
    add_complementiser(syntax, &mut phrase, &mut out);
    add_cue_phrase(syntax, &mut phrase, &mut out);

    let passive = phrase.flag(Feature::Passive);
    let kind = phrase.interrogative_type();
    if is_expletive_subject(&phrase) || InterrogativeType::is_subject(kind) {
        if let Some(verb) = phrase.verb_element_mut() {
            verb.set(Feature::ComplementAgreement, true);
        }
    }

    let mut split = None;
    let mut wh_object = false;
    match kind {
        Some(kind) => {
            wh_object = matches!(
                kind,
                InterrogativeType::WhatObject
                    | InterrogativeType::WhoObject
                    | InterrogativeType::HowPredicate
                    | InterrogativeType::How
                    | InterrogativeType::Why
                    | InterrogativeType::Where
            );
            split = realise_interrogative(syntax, &mut phrase, kind, passive, &mut out);
        }
        None => realise_list(
            syntax,
            &mut out,
            std::mem::take(&mut phrase.front_modifiers),
            DiscourseFunction::FrontModifier,
        ),
    }

    add_subjects_to_front(syntax, &phrase, passive, split.is_some(), &mut out);
    if let Some(passive_split) = add_passive_complements(syntax, &mut phrase, passive, kind, &mut out) {
        split = Some(passive_split);
    }
    realise_verb(syntax, &mut phrase, split, wh_object, &mut out);
    if passive {
        add_passive_subjects(syntax, &mut phrase, kind.is_some(), &mut out);
    }
    if kind.is_some() {
        for modifier in std::mem::take(&mut phrase.front_modifiers) {
            if let Some(mut current) = syntax.realise(modifier) {
                current.set_function(DiscourseFunction::FrontModifier);
                out.push(current);
            }
        }
    }
    if kind == Some(InterrogativeType::WhoIndirectObject) {
        let to = syntax.factory().create_word("to", LexicalCategory::Preposition);
        out.extend(syntax.realise(to.into()));
    }
    Element::list(out)
}

/// Make the verb agree with the subjects: coordinated and multiple
/// subjects are plural, a single noun phrase lends its person.
fn check_subject_number_person(phrase: &mut PhraseElement) {
    let (plural, person) = match phrase.subjects.as_slice() {
        [] => (false, None),
        [subject] => subject_agreement(subject),
        _ => (true, None),
    };
    let number = if plural {
        Some(FeatureValue::Number(NumberAgreement::Plural))
    } else {
        phrase.feature(Feature::Number).cloned()
    };
    if let Some(verb) = phrase.verb_element_mut() {
        verb.set_opt(Feature::Number, number);
        if let Some(person) = person {
            verb.set_feature(Feature::Person, person);
        }
    }
}

fn subject_agreement(subject: &Element) -> (bool, Option<FeatureValue>) {
    if let Element::Coordinated(coordinated) = subject {
        if coordinated.check_if_plural() {
            return (true, None);
        }
    }
    if subject.is_plural() && !subject.is_phrase(PhraseCategory::Clause) {
        return (true, None);
    }
    match subject {
        Element::Phrase(np) if np.category == PhraseCategory::NounPhrase => {
            let person = np.feature(Feature::Person).cloned();
            let plural = match np.head.as_deref() {
                Some(head) => head.is_plural() || matches!(head, Element::List(_)),
                None => false,
            };
            (plural, person)
        }
        _ => (false, None),
    }
}

/// A clause used as an object or subject changes form: imperative objects
/// become infinitives ("told him to go"), subjects become gerunds.
fn check_discourse_function(phrase: &mut PhraseElement) {
    let form = phrase.form();
    match phrase.function() {
        Some(DiscourseFunction::Object) | Some(DiscourseFunction::IndirectObject) => {
            if form == Some(Form::Imperative) {
                phrase.set(Feature::SuppressedComplementiser, true);
                phrase.set(Feature::Form, Form::Infinitive);
            } else if form == Some(Form::Gerund) && phrase.subjects.is_empty() {
                phrase.set(Feature::SuppressedComplementiser, true);
            }
        }
        Some(DiscourseFunction::Subject) => {
            phrase.set(Feature::Form, Form::Gerund);
            phrase.set(Feature::SuppressedComplementiser, true);
        }
        _ => {}
    }
}

fn add_post_modifier(verb: &mut Element, modifier: Element) {
    match verb {
        Element::Phrase(vp) => {
            if !vp.postmodifiers.contains(&modifier) {
                vp.add_post_modifier(modifier);
            }
        }
        Element::Coordinated(vp) => {
            if !vp.postmodifiers.contains(&modifier) {
                vp.add_post_modifier(modifier);
            }
        }
        _ => {}
    }
}

/// Clause postmodifiers live on the verb. Infinitive clauses also move
/// their front modifiers after the verb and keep the verb uninflected.
fn copy_front_modifiers(phrase: &mut PhraseElement) {
    let postmodifiers = std::mem::take(&mut phrase.postmodifiers);
    if let Some(verb) = phrase.verb_element_mut() {
        for modifier in postmodifiers {
            add_post_modifier(verb, modifier);
        }
    }
    if phrase.form() != Some(Form::Infinitive) {
        return;
    }
    phrase.set(Feature::SuppressedComplementiser, true);
    let front_modifiers = std::mem::take(&mut phrase.front_modifiers);
    if let Some(verb) = phrase.verb_element_mut() {
        for modifier in front_modifiers {
            add_post_modifier(verb, modifier);
        }
        verb.set(Feature::NonMorph, true);
    }
}

fn add_complementiser(syntax: &SyntaxProcessor<'_>, phrase: &mut PhraseElement, out: &mut Vec<Element>) {
    if phrase.clause_status() != Some(ClauseStatus::Subordinate)
        || phrase.flag(Feature::SuppressedComplementiser)
    {
        return;
    }
    if let Some(complementiser) = phrase.complementiser.take() {
        out.extend(syntax.realise(*complementiser));
    }
}

fn add_cue_phrase(syntax: &SyntaxProcessor<'_>, phrase: &mut PhraseElement, out: &mut Vec<Element>) {
    let Some(cue) = phrase.cue_phrase.take() else {
        return;
    };
    if let Some(mut current) = syntax.realise(*cue) {
        current.set_function(DiscourseFunction::CuePhrase);
        out.push(current);
    }
}

fn realise_interrogative(
    syntax: &SyntaxProcessor<'_>,
    phrase: &mut PhraseElement,
    kind: InterrogativeType,
    passive: bool,
    out: &mut Vec<Element>,
) -> Option<Element> {
    match kind {
        InterrogativeType::YesNo => realise_yes_no(syntax, phrase, passive, out),
        InterrogativeType::WhoSubject | InterrogativeType::WhatSubject => {
            if let Some(word) = kind.question_word() {
                realise_key_word(syntax, word, LexicalCategory::Pronoun, out);
            }
            phrase.subjects.clear();
            None
        }
        InterrogativeType::HowMany => {
            realise_key_word(syntax, "how", LexicalCategory::Pronoun, out);
            realise_key_word(syntax, "many", LexicalCategory::Adverb, out);
            None
        }
        InterrogativeType::HowPredicate => realise_object_wh(syntax, "how", phrase, passive, out),
        InterrogativeType::How
        | InterrogativeType::Why
        | InterrogativeType::Where
        | InterrogativeType::WhoObject
        | InterrogativeType::WhoIndirectObject
        | InterrogativeType::WhatObject => {
            let word = kind.question_word().unwrap_or_default();
            realise_object_wh(syntax, word, phrase, passive, out)
        }
    }
}

fn has_auxiliary(phrase: &PhraseElement) -> bool {
    phrase.has(Feature::Modal)
        || phrase.flag(Feature::Perfect)
        || phrase.flag(Feature::Progressive)
        || phrase.tense() == Some(Tense::Future)
}

/// "What does John eat?": the question word, then "do" support unless an
/// auxiliary or "be" can invert with the subject.
fn realise_object_wh(
    syntax: &SyntaxProcessor<'_>,
    keyword: &str,
    phrase: &PhraseElement,
    passive: bool,
    out: &mut Vec<Element>,
) -> Option<Element> {
    realise_key_word(syntax, keyword, LexicalCategory::Pronoun, out);
    if !has_auxiliary(phrase) && !phrase_is_copular(phrase) {
        add_do_auxiliary(syntax, phrase, out);
        None
    } else if !passive {
        Some(Element::list(realise_subjects(syntax, phrase)))
    } else {
        None
    }
}

fn realise_yes_no(
    syntax: &SyntaxProcessor<'_>,
    phrase: &PhraseElement,
    passive: bool,
    out: &mut Vec<Element>,
) -> Option<Element> {
    let copular_verb_phrase = matches!(
        phrase.verb_phrase.as_deref(),
        Some(Element::Phrase(vp))
            if vp.category == PhraseCategory::VerbPhrase && vp.head.as_deref().is_some_and(is_copular)
    );
    let needs_do = !copular_verb_phrase
        && !phrase.flag(Feature::Progressive)
        && !phrase.has(Feature::Modal)
        && phrase.tense() != Some(Tense::Future)
        && !phrase.flag(Feature::Negated)
        && !passive;
    if needs_do {
        add_do_auxiliary(syntax, phrase, out);
        None
    } else {
        Some(Element::list(realise_subjects(syntax, phrase)))
    }
}

fn add_do_auxiliary(syntax: &SyntaxProcessor<'_>, phrase: &PhraseElement, out: &mut Vec<Element>) {
    let mut do_phrase = syntax.factory().create_verb_phrase("do");
    for key in [Feature::Tense, Feature::Person, Feature::Number] {
        do_phrase.set_opt(key, phrase.feature(key).cloned());
    }
    out.extend(syntax.realise(do_phrase.into()));
}

fn realise_key_word(syntax: &SyntaxProcessor<'_>, word: &str, category: LexicalCategory, out: &mut Vec<Element>) {
    let question = syntax.factory().create_word(word, category);
    out.extend(syntax.realise(question.into()));
}

fn add_subjects_to_front(
    syntax: &SyntaxProcessor<'_>,
    phrase: &PhraseElement,
    passive: bool,
    split: bool,
    out: &mut Vec<Element>,
) {
    let form = phrase.form();
    if form == Some(Form::Infinitive) || form == Some(Form::Imperative) || passive || split {
        return;
    }
    out.extend(realise_subjects(syntax, phrase));
}

fn gerund_possessive(phrase: &PhraseElement) -> bool {
    phrase.form() == Some(Form::Gerund) && !phrase.flag(Feature::SuppressGenitiveInGerund)
}

/// Subjects are realised from copies: passive questions need them twice.
fn realise_subjects(syntax: &SyntaxProcessor<'_>, phrase: &PhraseElement) -> Vec<Element> {
    let possessive = gerund_possessive(phrase);
    let mut out = Vec::new();
    for subject in &phrase.subjects {
        let mut subject = subject.clone();
        subject.set_function(DiscourseFunction::Subject);
        if possessive {
            subject.set(Feature::Possessive, true);
        }
        out.extend(syntax.realise(subject));
    }
    out
}

/// Passive objects move in front of the verb and the verb agrees with them.
/// In a question the object becomes the split that goes after the first
/// auxiliary.
fn add_passive_complements(
    syntax: &SyntaxProcessor<'_>,
    phrase: &mut PhraseElement,
    passive: bool,
    kind: Option<InterrogativeType>,
    out: &mut Vec<Element>,
) -> Option<Element> {
    let mut passive_number: Option<FeatureValue> = None;
    let mut passive_person: Option<Person> = None;
    let mut count = 0;
    let mut coordinated_and = false;
    let mut split = None;
    let possessive = gerund_possessive(phrase);

    if passive && kind != Some(InterrogativeType::WhatObject) {
        if let Some(Element::Phrase(vp)) = phrase.verb_phrase.as_deref_mut() {
            for complement in vp.complements.iter_mut() {
                if complement.function() != Some(DiscourseFunction::Object) {
                    continue;
                }
                complement.set(Feature::Passive, true);
                count += 1;
                if possessive {
                    complement.set(Feature::Possessive, true);
                }
                if let Some(mut current) = syntax.realise(complement.clone()) {
                    current.set_function(DiscourseFunction::Object);
                    if kind.is_some() {
                        split = Some(current);
                    } else {
                        out.push(current);
                    }
                }
                if !coordinated_and {
                    if let Element::Coordinated(coordinated) = &*complement {
                        coordinated_and = coordinated.conjunction.as_deref() == Some("and");
                    }
                }
                passive_number = match passive_number {
                    None => complement.feature(Feature::Number).cloned(),
                    Some(_) => Some(FeatureValue::Number(NumberAgreement::Plural)),
                };
                passive_person = match complement.person() {
                    Some(Person::First) => Some(Person::First),
                    Some(Person::Second) if passive_person != Some(Person::First) => Some(Person::Second),
                    _ if passive_person.is_none() => Some(Person::Third),
                    _ => passive_person,
                };
            }
        }
    }

    if let Some(verb) = phrase.verb_element_mut() {
        if let Some(person) = passive_person {
            verb.set(Feature::Person, person);
        }
        if count > 1 || coordinated_and {
            verb.set(Feature::Number, NumberAgreement::Plural);
        } else if let Some(number) = passive_number {
            verb.set_feature(Feature::Number, number);
        }
    }
    split
}

/// Realise the verb phrase, placing a split subject or object after its
/// first word ("is the man kissed", "who is kissed").
fn realise_verb(
    syntax: &SyntaxProcessor<'_>,
    phrase: &mut PhraseElement,
    split: Option<Element>,
    wh_object: bool,
    out: &mut Vec<Element>,
) {
    let Some(verb) = phrase.verb_phrase.take().or_else(|| phrase.head.take()) else {
        out.extend(split);
        return;
    };
    let Some(mut current) = syntax.realise(*verb) else {
        out.extend(split);
        return;
    };
    let Some(split) = split else {
        current.set_function(DiscourseFunction::VerbPhrase);
        out.push(current);
        return;
    };
    match current {
        Element::List(list) => {
            let mut children = list.components.into_iter();
            if let Some(mut first) = children.next() {
                first.set_function(DiscourseFunction::VerbPhrase);
                out.push(first);
            }
            out.push(split);
            for mut child in children {
                child.set_function(DiscourseFunction::VerbPhrase);
                out.push(child);
            }
        }
        mut other => {
            other.set_function(DiscourseFunction::VerbPhrase);
            if wh_object {
                out.push(other);
                out.push(split);
            } else {
                out.push(split);
                out.push(other);
            }
        }
    }
}

/// The passive agent: "by" followed by the original subjects.
fn add_passive_subjects(
    syntax: &SyntaxProcessor<'_>,
    phrase: &mut PhraseElement,
    interrogative: bool,
    out: &mut Vec<Element>,
) {
    let subjects = std::mem::take(&mut phrase.subjects);
    if !subjects.is_empty() || interrogative {
        let by = syntax.factory().create_preposition_phrase("by", ());
        out.extend(syntax.realise(by.into()));
    }
    for mut subject in subjects {
        subject.set(Feature::Passive, true);
        if subject.is_phrase(PhraseCategory::NounPhrase) || matches!(subject, Element::Coordinated(_)) {
            if let Some(mut current) = syntax.realise(subject) {
                current.set_function(DiscourseFunction::Subject);
                out.push(current);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::factory::NlgFactory;
    use crate::core::lexicon::MemoryLexicon;
    use crate::schema::element::CoordinatedPhrase;

    #[test]
    fn coordinated_subjects_make_the_verb_plural() {
        let lexicon = MemoryLexicon::english().unwrap();
        let factory = NlgFactory::new(lexicon.as_ref());
        let subject = CoordinatedPhrase::new(vec![
            factory.create_noun_phrase("the", "dog").into(),
            factory.create_noun_phrase("the", "cat").into(),
        ]);
        let mut clause = factory.create_clause(subject, "chase", "the mouse");
        check_subject_number_person(&mut clause);
        let verb = clause.verb_element().unwrap();
        assert_eq!(verb.number(), Some(NumberAgreement::Plural));
    }

    #[test]
    fn noun_phrase_subject_lends_its_person() {
        let lexicon = MemoryLexicon::english().unwrap();
        let factory = NlgFactory::new(lexicon.as_ref());
        let mut clause = factory.create_clause("I", "go", ());
        check_subject_number_person(&mut clause);
        let verb = clause.verb_element().unwrap();
        assert_eq!(verb.person(), Some(Person::First));
        assert_eq!(verb.number(), Some(NumberAgreement::Singular));
    }

    #[test]
    fn subject_clauses_become_gerunds() {
        let lexicon = MemoryLexicon::english().unwrap();
        let factory = NlgFactory::new(lexicon.as_ref());
        let mut clause = factory.create_clause((), "run", ());
        clause.set_function(DiscourseFunction::Subject);
        check_discourse_function(&mut clause);
        assert_eq!(clause.form(), Some(Form::Gerund));
        assert!(clause.flag(Feature::SuppressedComplementiser));
    }

    #[test]
    fn infinitive_clauses_move_front_modifiers_after_the_verb() {
        let lexicon = MemoryLexicon::english().unwrap();
        let factory = NlgFactory::new(lexicon.as_ref());
        let mut clause = factory.create_clause((), "go", ());
        clause.set(Feature::Form, Form::Infinitive);
        clause.add_front_modifier(Element::canned("tomorrow"));
        copy_front_modifiers(&mut clause);
        assert!(clause.front_modifiers.is_empty());
        let Some(Element::Phrase(vp)) = clause.verb_phrase.as_deref() else {
            panic!("clause without verb phrase");
        };
        assert_eq!(vp.postmodifiers.len(), 1);
        assert!(vp.flag(Feature::NonMorph));
    }

    #[test]
    fn passive_objects_move_in_front() {
        let lexicon = MemoryLexicon::english().unwrap();
        let factory = NlgFactory::new(lexicon.as_ref());
        let syntax = SyntaxProcessor::new(lexicon.as_ref());
        let mut clause = factory.create_clause("the woman", "kiss", "the man");
        clause.set(Feature::Passive, true);
        let mut out = Vec::new();
        let split = add_passive_complements(&syntax, &mut clause, true, None, &mut out);
        assert!(split.is_none());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].function(), Some(DiscourseFunction::Object));
        let verb = clause.verb_element().unwrap();
        assert_eq!(verb.person(), Some(Person::Third));
    }

    #[test]
    fn who_subject_questions_drop_the_subject() {
        let lexicon = MemoryLexicon::english().unwrap();
        let factory = NlgFactory::new(lexicon.as_ref());
        let syntax = SyntaxProcessor::new(lexicon.as_ref());
        let mut clause = factory.create_clause("the woman", "kiss", "the man");
        let mut out = Vec::new();
        let split = realise_interrogative(&syntax, &mut clause, InterrogativeType::WhoSubject, false, &mut out);
        assert!(split.is_none());
        assert!(clause.subjects.is_empty());
        assert_eq!(out[0].base_form(), Some("who"));
    }
}

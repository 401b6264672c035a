//! Word order produced by the syntax stage, checked before any inflection.

use surface_realiser::core::syntax::SyntaxProcessor;
use surface_realiser::schema::features::{DiscourseFunction, Form};
use surface_realiser::{Element, Feature, HasFeatures, InterrogativeType, MemoryLexicon, NlgFactory};

/// Flatten a realised tree into base forms and canned text.
fn words(element: &Element) -> Vec<String> {
    match element {
        Element::Word(w) => vec![w.base_form.clone()],
        Element::Inflected(w) => vec![w.base_form.clone()],
        Element::Canned(s) => vec![s.text.clone()],
        Element::List(list) => list.components.iter().flat_map(words).collect(),
        Element::Coordinated(c) => c.coordinates.iter().flat_map(words).collect(),
        Element::Phrase(_) | Element::Document(_) => Vec::new(),
    }
}

fn realise(element: impl Into<Element>) -> Vec<String> {
    let lexicon = MemoryLexicon::english().unwrap();
    let syntax = SyntaxProcessor::new(lexicon.as_ref());
    syntax.realise(element.into()).map(|e| words(&e)).unwrap_or_default()
}

fn factory_words<F>(build: F) -> Vec<String>
where
    F: FnOnce(&NlgFactory<'_>) -> Element,
{
    let lexicon = MemoryLexicon::english().unwrap();
    let factory = NlgFactory::new(lexicon.as_ref());
    realise(build(&factory))
}

#[test]
fn declarative_clause_is_subject_verb_object() {
    let out = factory_words(|f| f.create_clause("the woman", "kiss", "the man").into());
    assert_eq!(out, ["the woman", "kiss", "the man"]);
}

#[test]
fn perfect_clause_adds_have() {
    let out = factory_words(|f| {
        let mut clause = f.create_clause("the woman", "kiss", "the man");
        clause.set(Feature::Perfect, true);
        clause.into()
    });
    assert_eq!(out, ["the woman", "have", "kiss", "the man"]);
}

#[test]
fn passive_clause_puts_the_object_first() {
    let out = factory_words(|f| {
        let mut clause = f.create_clause("the woman", "kiss", "the man");
        clause.set(Feature::Passive, true);
        clause.into()
    });
    assert_eq!(out, ["the man", "be", "kiss", "by", "the woman"]);
}

#[test]
fn yes_no_question_fronts_do() {
    let out = factory_words(|f| {
        let mut clause = f.create_clause("the woman", "kiss", "the man");
        clause.set(Feature::InterrogativeType, InterrogativeType::YesNo);
        clause.into()
    });
    assert_eq!(out, ["do", "the woman", "kiss", "the man"]);
}

#[test]
fn yes_no_question_inverts_the_copula() {
    let out = factory_words(|f| {
        let mut clause = f.create_clause("the man", "be", "happy");
        clause.set(Feature::InterrogativeType, InterrogativeType::YesNo);
        clause.into()
    });
    assert_eq!(out, ["be", "the man", "happy"]);
}

#[test]
fn subject_question_replaces_the_subject() {
    let out = factory_words(|f| {
        let mut clause = f.create_clause("the woman", "kiss", "the man");
        clause.set(Feature::InterrogativeType, InterrogativeType::WhoSubject);
        clause.into()
    });
    assert_eq!(out, ["who", "kiss", "the man"]);
}

#[test]
fn negation_adds_do_and_not() {
    let out = factory_words(|f| {
        let mut clause = f.create_clause("the woman", "kiss", "the man");
        clause.set(Feature::Negated, true);
        clause.into()
    });
    assert_eq!(out, ["the woman", "do", "not", "kiss", "the man"]);
}

#[test]
fn infinitive_form_takes_to() {
    let out = factory_words(|f| {
        let mut vp = f.create_verb_phrase("go");
        vp.set(Feature::Form, Form::Infinitive);
        vp.into()
    });
    assert_eq!(out, ["to", "go"]);
}

#[test]
fn noun_phrase_functions() {
    let lexicon = MemoryLexicon::english().unwrap();
    let factory = NlgFactory::new(lexicon.as_ref());
    let syntax = SyntaxProcessor::new(lexicon.as_ref());
    let np = factory.create_noun_phrase("the", "dog");
    let Some(Element::List(list)) = syntax.realise(np.into()) else {
        panic!("expected a list");
    };
    assert_eq!(list.components[0].function(), Some(DiscourseFunction::Specifier));
    assert_eq!(list.components[1].base_form(), Some("dog"));
}

#[test]
fn coordinated_noun_phrases_interleave_the_conjunction() {
    let out = factory_words(|f| {
        let mut coordination = f.create_coordinated_phrase(
            f.create_noun_phrase("the", "dog"),
            f.create_noun_phrase("the", "cat"),
        );
        f.add_coordinate(&mut coordination, f.create_noun_phrase("a", "mouse"));
        coordination.into()
    });
    assert_eq!(out, ["the", "dog", "and", "the", "cat", "and", "a", "mouse"]);
}

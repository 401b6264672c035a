//! Inflection seen through the whole pipeline.

use surface_realiser::schema::category::LexicalCategory;
use surface_realiser::schema::features::{DiscourseFunction, Form};
use surface_realiser::{Element, Feature, HasFeatures, NumberAgreement, Person, Realiser, Tense};

fn realiser() -> Realiser {
    Realiser::builder().build().unwrap()
}

fn text(realiser: &Realiser, element: impl Into<Element>) -> String {
    realiser.realise(element.into()).unwrap().text
}

#[test]
fn irregular_and_regular_plurals() {
    let realiser = realiser();
    let factory = realiser.factory();
    for (noun, expected) in [
        ("child", "the children"),
        ("man", "the men"),
        ("dog", "the dogs"),
        ("sheep", "the sheep"),
    ] {
        let mut np = factory.create_noun_phrase("the", noun);
        np.set(Feature::Number, NumberAgreement::Plural);
        assert_eq!(text(&realiser, np), expected);
    }
}

#[test]
fn possessive_noun_phrases() {
    let realiser = realiser();
    let factory = realiser.factory();
    let mut dog = factory.create_noun_phrase("the", "dog");
    dog.set(Feature::Possessive, true);
    assert_eq!(text(&realiser, dog), "the dog's");

    let mut dogs = factory.create_noun_phrase("the", "dog");
    dogs.set(Feature::Possessive, true);
    dogs.set(Feature::Number, NumberAgreement::Plural);
    assert_eq!(text(&realiser, dogs), "the dogs'");
}

#[test]
fn progressive_uses_the_present_participle() {
    let realiser = realiser();
    let factory = realiser.factory();
    let mut clause = factory.create_clause("the woman", "kiss", "the man");
    clause.set(Feature::Progressive, true);
    assert_eq!(text(&realiser, clause), "the woman is kissing the man");

    let mut clause = factory.create_clause("the woman", "run", ());
    clause.set(Feature::Progressive, true);
    clause.set(Feature::Tense, Tense::Past);
    assert_eq!(text(&realiser, clause), "the woman was running");
}

#[test]
fn perfect_uses_the_lexicon_form_of_have() {
    let realiser = realiser();
    let factory = realiser.factory();
    let mut clause = factory.create_clause("the woman", "kiss", "the man");
    clause.set(Feature::Perfect, true);
    assert_eq!(text(&realiser, clause), "the woman has kissed the man");
}

#[test]
fn regular_and_irregular_past() {
    let realiser = realiser();
    let factory = realiser.factory();
    let mut kissed = factory.create_clause("the woman", "kiss", "the man");
    kissed.set(Feature::Tense, Tense::Past);
    assert_eq!(text(&realiser, kissed), "the woman kissed the man");

    let mut went = factory.create_clause("the woman", "go", ());
    went.set(Feature::Tense, Tense::Past);
    assert_eq!(text(&realiser, went), "the woman went");
}

#[test]
fn be_agrees_in_the_past() {
    let realiser = realiser();
    let factory = realiser.factory();
    let mut singular = factory.create_clause("I", "be", "happy");
    singular.set(Feature::Tense, Tense::Past);
    assert_eq!(text(&realiser, singular), "I was happy");

    let mut plural = factory.create_clause("they", "be", "happy");
    plural.set(Feature::Tense, Tense::Past);
    assert_eq!(text(&realiser, plural), "they were happy");
}

#[test]
fn negation_keeps_the_main_verb_bare() {
    let realiser = realiser();
    let factory = realiser.factory();
    let mut clause = factory.create_clause("the woman", "kiss", "the man");
    clause.set(Feature::Negated, true);
    assert_eq!(text(&realiser, clause), "the woman does not kiss the man");
}

#[test]
fn graded_adjectives() {
    let realiser = realiser();
    let factory = realiser.factory();
    let mut bigger = factory.create_word("big", LexicalCategory::Adjective);
    bigger.set(Feature::IsComparative, true);
    assert_eq!(text(&realiser, bigger), "bigger");

    let mut best = factory.create_word("good", LexicalCategory::Adjective);
    best.set(Feature::IsSuperlative, true);
    assert_eq!(text(&realiser, best), "best");
}

#[test]
fn pronoun_case_depends_on_function() {
    let realiser = realiser();
    let factory = realiser.factory();
    let mut pronoun = factory.create_word("I", LexicalCategory::Pronoun);
    pronoun.set(Feature::Person, Person::First);
    pronoun.set(Feature::Number, NumberAgreement::Plural);
    assert_eq!(text(&realiser, pronoun.clone()), "us");
    pronoun.set_function(DiscourseFunction::Subject);
    assert_eq!(text(&realiser, pronoun), "we");
}

#[test]
fn gerund_form_of_a_verb_phrase() {
    let realiser = realiser();
    let factory = realiser.factory();
    let mut vp = factory.create_verb_phrase("run");
    vp.set(Feature::Form, Form::Gerund);
    assert_eq!(text(&realiser, vp), "running");
}

//! Noun phrases: specifier, ordered premodifiers, head noun, complements
//! and postmodifiers. Pronominal phrases collapse to a single pronoun.

use super::phrase::realise_list;
use super::SyntaxProcessor;
use crate::schema::category::{LexicalCategory, PhraseCategory};
use crate::schema::element::{Element, HasFeatures, InflectedWord, PhraseElement, WordElement};
use crate::schema::features::{DiscourseFunction, Feature, Gender, Person};

const QUALITATIVE_POSITION: u8 = 1;
const COLOUR_POSITION: u8 = 2;
const CLASSIFYING_POSITION: u8 = 3;
const NOUN_POSITION: u8 = 4;

const HEAD_FEATURES: [Feature; 7] = [
    Feature::Elided,
    Feature::Gender,
    Feature::Acronym,
    Feature::Number,
    Feature::Person,
    Feature::Possessive,
    Feature::Passive,
];

pub(super) fn realise(syntax: &SyntaxProcessor<'_>, mut phrase: PhraseElement) -> Element {
    let mut out = Vec::new();
    if phrase.flag(Feature::Elided) {
        return Element::list(out);
    }
    if phrase.flag(Feature::Pronominal) {
        out.push(create_pronoun(syntax, &phrase));
        return Element::list(out);
    }
    realise_specifier(syntax, &mut phrase, &mut out);
    let mut premodifiers = std::mem::take(&mut phrase.premodifiers);
    if phrase.flag(Feature::AdjectiveOrdering) {
        sort_premodifiers(&mut premodifiers);
    }
    realise_list(syntax, &mut out, premodifiers, DiscourseFunction::PreModifier);
    realise_head_noun(syntax, &mut phrase, &mut out);
    realise_list(
        syntax,
        &mut out,
        std::mem::take(&mut phrase.complements),
        DiscourseFunction::Complement,
    );
    realise_list(
        syntax,
        &mut out,
        std::mem::take(&mut phrase.postmodifiers),
        DiscourseFunction::PostModifier,
    );
    Element::list(out)
}

fn realise_specifier(syntax: &SyntaxProcessor<'_>, phrase: &mut PhraseElement, out: &mut Vec<Element>) {
    if phrase.flag(Feature::Raised) {
        return;
    }
    let Some(mut specifier) = phrase.specifier.take().map(|s| *s) else {
        return;
    };
    if !specifier.is_lexical(LexicalCategory::Pronoun) && !specifier.is_phrase(PhraseCategory::NounPhrase) {
        specifier.set_opt(Feature::Number, phrase.feature(Feature::Number).cloned());
    }
    if let Some(mut specifier) = syntax.realise(specifier) {
        specifier.set_function(DiscourseFunction::Specifier);
        out.push(specifier);
    }
}

fn realise_head_noun(syntax: &SyntaxProcessor<'_>, phrase: &mut PhraseElement, out: &mut Vec<Element>) {
    let Some(mut head) = phrase.head.take().map(|h| *h) else {
        return;
    };
    for key in HEAD_FEATURES {
        head.set_opt(key, phrase.feature(key).cloned());
    }
    if let Some(mut head) = syntax.realise(head) {
        head.set_function(DiscourseFunction::Subject);
        out.push(head);
    }
}

/// Bubble adjectives into qualitative, colour, classifying, noun order.
/// Modifiers whose ranges overlap keep their relative order.
fn sort_premodifiers(modifiers: &mut [Element]) {
    if modifiers.len() <= 1 {
        return;
    }
    let mut changed = true;
    while changed {
        changed = false;
        for i in 0..modifiers.len() - 1 {
            if min_position(&modifiers[i]) > max_position(&modifiers[i + 1]) {
                modifiers.swap(i, i + 1);
                changed = true;
            }
        }
    }
}

fn is_adjectival(modifier: &Element) -> bool {
    modifier.is_lexical(LexicalCategory::Adjective) || modifier.is_phrase(PhraseCategory::AdjectivePhrase)
}

fn min_position(modifier: &Element) -> u8 {
    if modifier.is_lexical(LexicalCategory::Noun) || modifier.is_phrase(PhraseCategory::NounPhrase) {
        return NOUN_POSITION;
    }
    if !is_adjectival(modifier) {
        return QUALITATIVE_POSITION;
    }
    match head_word(modifier) {
        Some(w) if w.flag(Feature::Qualitative) => QUALITATIVE_POSITION,
        Some(w) if w.flag(Feature::Colour) => COLOUR_POSITION,
        Some(w) if w.flag(Feature::Classifying) => CLASSIFYING_POSITION,
        _ => QUALITATIVE_POSITION,
    }
}

fn max_position(modifier: &Element) -> u8 {
    if !is_adjectival(modifier) {
        return NOUN_POSITION;
    }
    match head_word(modifier) {
        Some(w) if w.flag(Feature::Classifying) => CLASSIFYING_POSITION,
        Some(w) if w.flag(Feature::Colour) => COLOUR_POSITION,
        Some(w) if w.flag(Feature::Qualitative) => QUALITATIVE_POSITION,
        _ => CLASSIFYING_POSITION,
    }
}

fn head_word(element: &Element) -> Option<&WordElement> {
    match element {
        Element::Word(word) => Some(word),
        Element::Inflected(word) => word.base_word.as_deref(),
        Element::Phrase(phrase) => phrase.head.as_deref().and_then(head_word),
        _ => None,
    }
}

fn create_pronoun(syntax: &SyntaxProcessor<'_>, phrase: &PhraseElement) -> Element {
    let pronoun = match (phrase.person(), phrase.gender()) {
        (Some(Person::First), _) => "I",
        (Some(Person::Second), _) => "you",
        (_, Some(Gender::Feminine)) => "she",
        (_, Some(Gender::Masculine)) => "he",
        _ => "it",
    };
    let word = syntax.factory().create_word(pronoun, LexicalCategory::Pronoun);
    let gender = word.feature(Feature::Gender).cloned();
    let person = word.feature(Feature::Person).cloned();
    let mut element = InflectedWord::from_word(word);
    element.set_opt(Feature::Gender, gender);
    element.set_opt(Feature::Person, person);
    element.set_function(DiscourseFunction::Specifier);
    element.set_opt(Feature::Possessive, phrase.feature(Feature::Possessive).cloned());
    element.set_opt(Feature::Number, phrase.feature(Feature::Number).cloned());
    if let Some(function) = phrase.function() {
        element.set_function(function);
    }
    element.into()
}

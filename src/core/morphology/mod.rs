//! Morphology stage: turns inflected words into their final word forms.
//!
//! Every inflected word becomes canned text carrying the word's discourse
//! function. Lists, coordinations and documents are walked; canned text
//! passes through untouched, so running the stage twice changes nothing.

pub mod determiner;
pub mod rules;

use tracing::trace;

use crate::core::lexicon::Lexicon;
use crate::schema::category::LexicalCategory;
use crate::schema::element::{Element, HasFeatures, InflectedWord, StringElement};
use crate::schema::features::{DiscourseFunction, Feature};

pub use determiner::{check_ends_with_indefinite_article, requires_an};

pub struct MorphologyProcessor<'a> {
    lexicon: &'a dyn Lexicon,
}

impl<'a> MorphologyProcessor<'a> {
    pub fn new(lexicon: &'a dyn Lexicon) -> Self {
        Self { lexicon }
    }

    /// Phrases should not survive syntax; one that does realises to nothing.
    pub fn realise(&self, element: Element) -> Option<Element> {
        match element {
            Element::Inflected(word) => Some(self.inflect(word)),
            Element::Canned(text) => Some(Element::Canned(text)),
            Element::Word(word) => Some(Element::canned(word.default_spelling())),
            Element::Document(mut document) => {
                let components = std::mem::take(&mut document.components);
                document.components = self.realise_list(components);
                Some(Element::Document(document))
            }
            Element::List(mut list) => {
                list.components = self.realise_list(std::mem::take(&mut list.components));
                Some(Element::List(list))
            }
            Element::Coordinated(mut phrase) => {
                let coordinates = std::mem::take(&mut phrase.coordinates);
                phrase.coordinates = coordinates
                    .into_iter()
                    .filter_map(|child| self.realise(child))
                    .collect();
                Some(Element::Coordinated(phrase))
            }
            Element::Phrase(phrase) => {
                trace!(category = ?phrase.category, "unrealised phrase dropped by morphology");
                None
            }
        }
    }

    /// Realise siblings, fixing the indefinite article against whatever
    /// follows it.
    pub fn realise_list(&self, elements: Vec<Element>) -> Vec<Element> {
        let mut out: Vec<Element> = Vec::with_capacity(elements.len());
        let mut determiner: Option<usize> = None;
        let mut previous_was_canned = false;
        for element in elements {
            let appositive = element.feature(Feature::Appositive).cloned();
            let function = element.function();
            let number = element.feature(Feature::Number).cloned();
            let is_noun = matches!(&element, Element::Inflected(w) if w.category == LexicalCategory::Noun);
            let was_canned = matches!(element, Element::Canned(_));
            let Some(mut current) = self.realise(element) else {
                previous_was_canned = was_canned;
                continue;
            };
            current.set_opt(Feature::Appositive, appositive);
            if let Some(function) = function {
                current.set_function(function);
            }
            if previous_was_canned && is_noun {
                if let Some(previous) = out.last_mut() {
                    let corrected =
                        check_ends_with_indefinite_article(previous.realisation(), current.realisation());
                    previous.set_realisation(corrected);
                }
            }
            previous_was_canned = was_canned;

            match determiner {
                None if current.function() == Some(DiscourseFunction::Specifier) => {
                    current.set_opt(Feature::Number, number);
                    determiner = Some(out.len());
                }
                Some(index) => {
                    let following = following_text(&current).to_string();
                    agree_determiner(&mut out[index], &following);
                    determiner = None;
                }
                None => {}
            }
            out.push(current);
        }
        out
    }

    fn inflect(&self, word: InflectedWord) -> Element {
        let function = word.function();
        if word.flag(Feature::NonMorph) {
            return StringElement::with_function(word.base_form, function).into();
        }
        let looked_up;
        let base = match word.base_word.as_deref() {
            Some(base) => base,
            None => {
                looked_up = self.lexicon.lookup_word(&word.base_form, word.category);
                &looked_up
            }
        };
        let text = match word.category {
            LexicalCategory::Pronoun => rules::pronoun(&word),
            LexicalCategory::Noun => rules::noun(&word, base),
            LexicalCategory::Verb => rules::verb(&word, base),
            LexicalCategory::Adjective => rules::adjective(&word, base),
            LexicalCategory::Adverb => rules::adverb(&word, base),
            _ => word.base_form.clone(),
        };
        StringElement::with_function(text, function).into()
    }
}

/// The text a pending determiner agrees with. Lists are read through their
/// first child, and a coordination through its first coordinate.
fn following_text(element: &Element) -> &str {
    match element {
        Element::List(list) => match list.components.first() {
            Some(Element::Coordinated(c)) => c.coordinates.first().map_or("", Element::realisation),
            Some(first) => first.realisation(),
            None => "",
        },
        other => other.realisation(),
    }
}

fn agree_determiner(determiner: &mut Element, following: &str) {
    if following.is_empty() || determiner.realisation() != "a" {
        return;
    }
    if determiner.is_plural() {
        determiner.set_realisation("some");
    } else if requires_an(following) {
        determiner.set_realisation("an");
    }
}

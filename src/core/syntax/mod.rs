//! Syntax stage: rewrites phrase specifications into ordered lists of
//! inflectable words in English word order.
//!
//! Each phrase category has its own helper module. Helpers consume the
//! phrase they realise and return a list element; this processor collapses
//! single-item lists and flattens list results into their siblings.

mod clause;
mod coordination;
mod noun_phrase;
mod phrase;
mod verb_phrase;

use tracing::trace;

use crate::core::factory::NlgFactory;
use crate::core::lexicon::Lexicon;
use crate::schema::category::PhraseCategory;
use crate::schema::element::{Element, HasFeatures, InflectedWord, ListElement};
use crate::schema::features::Feature;

pub use phrase::is_expletive_subject;
pub use verb_phrase::is_copular;

pub struct SyntaxProcessor<'a> {
    lexicon: &'a dyn Lexicon,
}

impl<'a> SyntaxProcessor<'a> {
    pub fn new(lexicon: &'a dyn Lexicon) -> Self {
        Self { lexicon }
    }

    pub(crate) fn factory(&self) -> NlgFactory<'a> {
        NlgFactory::new(self.lexicon)
    }

    /// Realise one element. Elided elements realise to nothing.
    pub fn realise(&self, element: Element) -> Option<Element> {
        if element.flag(Feature::Elided) {
            return None;
        }
        let realised = match element {
            Element::Document(mut document) => {
                let asks = document.components.iter().any(|c| {
                    c.is_phrase(PhraseCategory::Clause) && c.interrogative_type().is_some()
                });
                if asks {
                    document.set(Feature::Interrogative, true);
                }
                let components = std::mem::take(&mut document.components);
                document.components = self.realise_list(components);
                Some(Element::Document(document))
            }
            Element::Phrase(phrase) => match phrase.category {
                PhraseCategory::Clause => Some(clause::realise(self, phrase)),
                PhraseCategory::NounPhrase => Some(noun_phrase::realise(self, phrase)),
                PhraseCategory::VerbPhrase => Some(verb_phrase::realise(self, phrase)),
                PhraseCategory::PrepositionalPhrase
                | PhraseCategory::AdjectivePhrase
                | PhraseCategory::AdverbPhrase => Some(phrase::realise(self, phrase)),
                PhraseCategory::CannedText => Some(Element::Phrase(phrase)),
            },
            Element::List(list) => Some(Element::list(self.realise_list(list.components))),
            Element::Inflected(mut word) => {
                if word.base_word.is_none() {
                    let base = self.lexicon.lookup_word(&word.base_form, word.category);
                    word.base_word = Some(Box::new(base));
                }
                Some(Element::Inflected(word))
            }
            Element::Word(word) => {
                let features = word.features.clone();
                let mut inflected = InflectedWord::from_word(word);
                inflected.features.extend_from(&features);
                return self.realise(inflected.into());
            }
            Element::Coordinated(phrase) => Some(coordination::realise(self, phrase)),
            Element::Canned(text) => Some(Element::Canned(text)),
        };
        realised.map(collapse)
    }

    /// Realise a sequence, splicing list results into the output.
    pub fn realise_list(&self, elements: Vec<Element>) -> Vec<Element> {
        let mut out = Vec::with_capacity(elements.len());
        for element in elements {
            match self.realise(element) {
                Some(Element::List(list)) => out.extend(list.components),
                Some(other) => out.push(other),
                None => {}
            }
        }
        trace!(count = out.len(), "syntax list realised");
        out
    }
}

fn collapse(element: Element) -> Element {
    match element {
        Element::List(ListElement { mut components, .. }) if components.len() == 1 => {
            components.remove(0)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lexicon::MemoryLexicon;
    use crate::schema::category::LexicalCategory;
    use crate::schema::element::WordElement;

    #[test]
    fn words_become_inflected_with_their_features() {
        let lexicon = MemoryLexicon::english().unwrap();
        let syntax = SyntaxProcessor::new(lexicon.as_ref());
        let mut word = WordElement::new("dog", LexicalCategory::Noun);
        word.set(Feature::Possessive, true);
        let Some(Element::Inflected(out)) = syntax.realise(word.into()) else {
            panic!("expected an inflected word");
        };
        assert!(out.flag(Feature::Possessive));
        assert!(out.base_word.is_some());
    }

    #[test]
    fn elided_elements_vanish() {
        let lexicon = MemoryLexicon::english().unwrap();
        let syntax = SyntaxProcessor::new(lexicon.as_ref());
        let mut text = Element::canned("gone");
        text.set(Feature::Elided, true);
        assert!(syntax.realise(text).is_none());
    }

    #[test]
    fn single_item_lists_collapse() {
        let lexicon = MemoryLexicon::english().unwrap();
        let syntax = SyntaxProcessor::new(lexicon.as_ref());
        let list = Element::list(vec![Element::list(vec![Element::canned("x")])]);
        assert_eq!(syntax.realise(list), Some(Element::canned("x")));
    }
}

//! Orthography stage: joins realised words into text, punctuates sentences
//! and places commas according to discourse function.

use crate::schema::category::DocumentCategory;
use crate::schema::element::{Element, HasFeatures, StringElement};
use crate::schema::features::{DiscourseFunction, Feature};

/// Remove spaces in front of commas and collapse comma runs.
///
/// Applying it to its own output changes nothing.
pub fn clean_up(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c == ',' {
            let kept = out.trim_end_matches(' ').len();
            out.truncate(kept);
            if out.ends_with(',') {
                continue;
            }
        }
        out.push(c);
    }
    out
}

#[derive(Debug, Clone)]
pub struct OrthographyProcessor {
    comma_separate_premodifiers: bool,
    comma_separate_cue_phrase: bool,
}

impl Default for OrthographyProcessor {
    fn default() -> Self {
        Self {
            comma_separate_premodifiers: true,
            comma_separate_cue_phrase: false,
        }
    }
}

impl OrthographyProcessor {
    pub fn new(comma_separate_premodifiers: bool, comma_separate_cue_phrase: bool) -> Self {
        Self {
            comma_separate_premodifiers,
            comma_separate_cue_phrase,
        }
    }

    pub fn comma_separate_premodifiers(&self) -> bool {
        self.comma_separate_premodifiers
    }

    pub fn set_comma_separate_premodifiers(&mut self, value: bool) {
        self.comma_separate_premodifiers = value;
    }

    pub fn comma_separate_cue_phrase(&self) -> bool {
        self.comma_separate_cue_phrase
    }

    pub fn set_comma_separate_cue_phrase(&mut self, value: bool) {
        self.comma_separate_cue_phrase = value;
    }

    /// Lists and coordinations collapse to canned text; documents keep
    /// their structure with realised components.
    pub fn realise(&self, element: Element) -> Option<Element> {
        let function = match &element {
            Element::List(list) => list.components.first().and_then(|c| c.function()),
            other => other.function(),
        };
        let mut realised = match element {
            Element::Document(mut document) => {
                let components = std::mem::take(&mut document.components);
                if document.category == DocumentCategory::Sentence {
                    if !components.is_empty() {
                        let text = self.realise_sentence(components, document.flag(Feature::Interrogative));
                        document.realisation = Some(text);
                    }
                } else {
                    document.components = self.realise_list(components);
                }
                Element::Document(document)
            }
            Element::List(list) => {
                let text = self.realise_by_function(list.components, function);
                StringElement::new(text).into()
            }
            Element::Coordinated(phrase) => StringElement::new(self.realise_coordinated(phrase.coordinates)).into(),
            other => other,
        };
        let cue = matches!(
            function,
            Some(DiscourseFunction::CuePhrase | DiscourseFunction::FrontModifier)
        );
        if cue && self.comma_separate_cue_phrase {
            let text = realised.realisation();
            if !text.ends_with(',') {
                let text = format!("{text},");
                realised.set_realisation(text);
            }
        }
        tidy(&mut realised);
        Some(realised)
    }

    /// Realise the documents in a sequence; anything else passes through.
    pub fn realise_list(&self, elements: Vec<Element>) -> Vec<Element> {
        elements
            .into_iter()
            .filter_map(|element| match element {
                Element::Document(_) => self.realise(element),
                other => Some(other),
            })
            .collect()
    }

    fn realise_by_function(&self, children: Vec<Element>, function: Option<DiscourseFunction>) -> String {
        match function {
            Some(DiscourseFunction::PreModifier) => {
                let appositive = !children.is_empty() && children.iter().all(|c| c.flag(Feature::Appositive));
                let mut buffer = String::new();
                if appositive {
                    buffer.push_str(", ");
                }
                let separator = if self.comma_separate_premodifiers { "," } else { "" };
                let mut buffer = self.join(buffer, children, separator);
                if appositive {
                    buffer.push_str(", ");
                }
                buffer
            }
            Some(DiscourseFunction::PostModifier) => {
                let count = children.len();
                let mut buffer = String::new();
                for (index, child) in children.into_iter().enumerate() {
                    let appositive = child.flag(Feature::Appositive);
                    let text = self.realise_text(child);
                    if appositive {
                        buffer.push_str(", ");
                        buffer.push_str(&text);
                        if index + 1 < count {
                            buffer.push_str(", ");
                        }
                    } else if !text.is_empty() {
                        buffer.push_str(&text);
                        buffer.push(' ');
                    }
                }
                buffer
            }
            Some(DiscourseFunction::CuePhrase | DiscourseFunction::FrontModifier)
                if self.comma_separate_cue_phrase =>
            {
                self.join(String::new(), children, ",")
            }
            _ => self.join(String::new(), children, ""),
        }
    }

    fn realise_text(&self, element: Element) -> String {
        self.realise(element)
            .map(|r| r.realisation().to_string())
            .unwrap_or_default()
    }

    /// Append each non-blank child to `buffer`, space-separated, with
    /// `separator` after every child but the last.
    fn join(&self, mut buffer: String, children: Vec<Element>, separator: &str) -> String {
        let count = children.len();
        for (index, child) in children.into_iter().enumerate() {
            let text = self.realise_text(child);
            if text.trim().is_empty() {
                continue;
            }
            buffer.push_str(&text);
            if count > 1 && index + 1 < count {
                buffer.push_str(separator);
            }
            buffer.push(' ');
        }
        buffer.pop();
        buffer
    }

    fn realise_sentence(&self, components: Vec<Element>, interrogative: bool) -> String {
        let text = self.join(String::new(), components, "");
        let mut text = text.trim_start_matches([' ', ',']).to_string();
        let Some(first) = text.chars().next() else {
            return text;
        };
        if first.is_lowercase() {
            let upper: String = first.to_uppercase().collect();
            text.replace_range(..first.len_utf8(), &upper);
        }
        if !text.ends_with(['.', '?']) {
            text.push(if interrogative { '?' } else { '.' });
        }
        text
    }

    /// Conjunctions before the last one become commas.
    fn realise_coordinated(&self, components: Vec<Element>) -> String {
        let count = components.len();
        let mut text = String::new();
        for (index, child) in components.into_iter().enumerate() {
            if index + 2 < count && child.function() == Some(DiscourseFunction::Conjunction) {
                text.push_str(", ");
            } else {
                text.push_str(&self.realise_text(child));
                text.push(' ');
            }
        }
        text.pop();
        text.replace(" ,", ",")
    }
}

fn tidy(element: &mut Element) {
    match element {
        Element::Canned(canned) => canned.text = clean_up(&canned.text),
        Element::Document(document) => {
            if let Some(text) = document.realisation.as_mut() {
                *text = clean_up(text);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::document::DocumentElement;
    use crate::schema::element::CoordinatedPhrase;

    fn with_function(text: &str, function: DiscourseFunction) -> Element {
        StringElement::with_function(text, Some(function)).into()
    }

    #[test]
    fn clean_up_removes_space_before_commas() {
        assert_eq!(clean_up("big , red"), "big, red");
        assert_eq!(clean_up("a  ,, b"), "a, b");
        assert_eq!(clean_up("a , , b"), "a, b");
        assert_eq!(clean_up("plain"), "plain");
    }

    #[test]
    fn sentences_are_capitalised_and_terminated() {
        let ortho = OrthographyProcessor::default();
        let mut sentence = DocumentElement::new(DocumentCategory::Sentence, None);
        sentence.add_component(Element::canned("the dog barks"));
        let out = ortho.realise(sentence.into()).unwrap();
        assert_eq!(out.realisation(), "The dog barks.");

        let mut question = DocumentElement::new(DocumentCategory::Sentence, None);
        question.add_component(Element::canned(", who is there"));
        question.set(Feature::Interrogative, true);
        assert_eq!(ortho.realise(question.into()).unwrap().realisation(), "Who is there?");
    }

    #[test]
    fn existing_terminators_are_kept() {
        let ortho = OrthographyProcessor::default();
        let mut sentence = DocumentElement::new(DocumentCategory::Sentence, None);
        sentence.add_component(Element::canned("Done."));
        assert_eq!(ortho.realise(sentence.into()).unwrap().realisation(), "Done.");
    }

    #[test]
    fn premodifiers_are_comma_separated() {
        let list = Element::list(vec![
            with_function("big", DiscourseFunction::PreModifier),
            with_function("red", DiscourseFunction::PreModifier),
        ]);
        let ortho = OrthographyProcessor::default();
        assert_eq!(ortho.realise(list.clone()).unwrap().realisation(), "big, red");
        let plain = OrthographyProcessor::new(false, false);
        assert_eq!(plain.realise(list).unwrap().realisation(), "big red");
    }

    #[test]
    fn appositive_postmodifiers_are_bracketed() {
        let mut appositive = with_function("my friend", DiscourseFunction::PostModifier);
        appositive.set(Feature::Appositive, true);
        let list = Element::list(vec![appositive, with_function("today", DiscourseFunction::PostModifier)]);
        let ortho = OrthographyProcessor::default();
        assert_eq!(ortho.realise(list).unwrap().realisation(), ", my friend, today");
    }

    #[test]
    fn cue_phrases_take_a_comma_when_asked() {
        let list = Element::list(vec![with_function("however", DiscourseFunction::CuePhrase)]);
        assert_eq!(
            OrthographyProcessor::default().realise(list.clone()).unwrap().realisation(),
            "however"
        );
        let ortho = OrthographyProcessor::new(true, true);
        assert_eq!(ortho.realise(list).unwrap().realisation(), "however,");
    }

    #[test]
    fn coordinations_use_commas_before_the_last_conjunction() {
        let mut coordination = CoordinatedPhrase::new(Vec::new());
        for (i, word) in ["apples", "pears", "plums"].iter().enumerate() {
            if i > 0 {
                coordination
                    .coordinates
                    .push(with_function("and", DiscourseFunction::Conjunction));
            }
            coordination.coordinates.push(Element::canned(*word));
        }
        let ortho = OrthographyProcessor::default();
        assert_eq!(
            ortho.realise(coordination.into()).unwrap().realisation(),
            "apples, pears and plums"
        );
    }

    #[test]
    fn blank_children_add_no_whitespace() {
        let list = Element::list(vec![
            Element::canned("a"),
            Element::canned("  "),
            Element::canned("vessel"),
        ]);
        let ortho = OrthographyProcessor::default();
        assert_eq!(ortho.realise(list).unwrap().realisation(), "a vessel");
    }
}

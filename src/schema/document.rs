use serde::{Deserialize, Serialize};

use super::category::{Category, DocumentCategory};
use super::element::{Element, HasFeatures};
use super::features::FeatureMap;

/// A structural element above the sentence: document, section, paragraph,
/// sentence, list or list item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentElement {
    pub category: DocumentCategory,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub components: Vec<Element>,
    #[serde(default)]
    pub realisation: Option<String>,
    #[serde(default)]
    pub features: FeatureMap,
}

impl DocumentElement {
    pub fn new(category: DocumentCategory, title: Option<String>) -> Self {
        Self {
            category,
            title,
            components: Vec::new(),
            realisation: None,
            features: FeatureMap::new(),
        }
    }

    /// Add a component, promoting it to a sentence and then a paragraph
    /// until this element can hold it. A component that cannot be promoted
    /// into place is added unchanged so it still shows up in the output.
    pub fn add_component(&mut self, element: Element) {
        let Some(category) = element.category() else {
            self.components.push(element);
            return;
        };
        if self.category.has_sub_part(category) {
            self.components.push(element);
            return;
        }
        match self.promote(element.clone()) {
            Some(promoted) => self.components.push(promoted),
            None => self.components.push(element),
        }
    }

    /// Add every component that fits directly; the rest are dropped.
    pub fn add_components(&mut self, elements: impl IntoIterator<Item = Element>) {
        for element in elements {
            if let Some(category) = element.category() {
                if self.category.has_sub_part(category) {
                    self.components.push(element);
                }
            }
        }
    }

    pub fn remove_component(&mut self, element: &Element) -> bool {
        match self.components.iter().position(|c| c == element) {
            Some(index) => {
                self.components.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear_components(&mut self) {
        self.components.clear();
    }

    fn promote(&self, element: Element) -> Option<Element> {
        let category = element.category()?;
        if self.category.has_sub_part(category) {
            return Some(element);
        }
        match category {
            Category::Document(DocumentCategory::Sentence) => {
                let mut paragraph = DocumentElement::new(DocumentCategory::Paragraph, None);
                paragraph.components.push(element);
                self.promote(paragraph.into())
            }
            Category::Document(_) => None,
            _ => {
                let mut sentence = DocumentElement::new(DocumentCategory::Sentence, None);
                sentence.components.push(element);
                self.promote(sentence.into())
            }
        }
    }
}

impl HasFeatures for DocumentElement {
    fn feature_map(&self) -> &FeatureMap {
        &self.features
    }
    fn feature_map_mut(&mut self) -> &mut FeatureMap {
        &mut self.features
    }
}

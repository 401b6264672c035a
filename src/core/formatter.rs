//! Plain-text layout of realised documents: titles, paragraph breaks,
//! bullets and dotted numbering for enumerated lists.

use std::fmt;
use std::num::ParseIntError;

use crate::schema::category::DocumentCategory;
use crate::schema::document::DocumentElement;
use crate::schema::element::Element;

/// Hierarchical counter for enumerated lists, rendered as "1", "2.1", ...
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberedPrefix {
    levels: Vec<u32>,
}

impl Default for NumberedPrefix {
    fn default() -> Self {
        Self { levels: vec![0] }
    }
}

impl NumberedPrefix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self) {
        if let Some(last) = self.levels.last_mut() {
            *last += 1;
        }
    }

    pub fn up_a_level(&mut self) {
        if self.levels == [0] {
            self.levels[0] = 1;
        } else {
            self.levels.push(1);
        }
    }

    pub fn down_a_level(&mut self) {
        if self.levels.len() <= 1 {
            self.levels = vec![0];
        } else {
            self.levels.pop();
        }
    }

    pub fn prefix(&self) -> String {
        self.to_string()
    }

    pub fn set_prefix(&mut self, text: &str) -> Result<(), ParseIntError> {
        let levels = text
            .split('.')
            .map(str::parse)
            .collect::<Result<Vec<u32>, _>>()?;
        self.levels = levels;
        Ok(())
    }
}

impl fmt::Display for NumberedPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, level) in self.levels.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{level}")?;
        }
        Ok(())
    }
}

/// Final stage. The numbering state lives across one `format` call, so a
/// formatter can be reused between documents.
#[derive(Debug, Default)]
pub struct TextFormatter {
    prefix: NumberedPrefix,
}

impl TextFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn format(&mut self, element: &Element) -> String {
        self.prefix = NumberedPrefix::new();
        self.render(element, None)
    }

    fn render(&mut self, element: &Element, parent: Option<DocumentCategory>) -> String {
        match element {
            Element::Canned(_) => element.realisation().to_string(),
            Element::Document(document) => self.render_document(document, parent),
            Element::List(list) => self.render_parts(&list.components, None),
            Element::Coordinated(phrase) => self.render_parts(&phrase.coordinates, None),
            Element::Word(_) | Element::Inflected(_) | Element::Phrase(_) => String::new(),
        }
    }

    /// Rendered text with surrounding spaces trimmed, which is how every
    /// part is read back by its container.
    fn render_trimmed(&mut self, element: &Element, parent: Option<DocumentCategory>) -> String {
        self.render(element, parent).trim_matches(' ').to_string()
    }

    fn render_parts(&mut self, parts: &[Element], parent: Option<DocumentCategory>) -> String {
        let mut out = String::new();
        for part in parts {
            out.push_str(&self.render_trimmed(part, parent));
            out.push(' ');
        }
        out
    }

    fn render_document(&mut self, document: &DocumentElement, parent: Option<DocumentCategory>) -> String {
        let here = Some(document.category);
        let mut out = String::new();
        match document.category {
            DocumentCategory::Document | DocumentCategory::Section | DocumentCategory::List => {
                let breaks = match document.category {
                    DocumentCategory::Document => 2,
                    DocumentCategory::Section => 1,
                    _ => 0,
                };
                if let Some(title) = document.title.as_deref().filter(|t| !t.is_empty()) {
                    out.push_str(title);
                    out.push_str(&"\n".repeat(breaks));
                }
                for component in &document.components {
                    out.push_str(&self.render_trimmed(component, here));
                }
            }
            DocumentCategory::EnumeratedList => {
                self.prefix.up_a_level();
                if let Some(title) = &document.title {
                    out.push_str(title);
                    out.push('\n');
                }
                let mut previous: Option<String> = None;
                for component in &document.components {
                    if let Some(previous) = &previous {
                        if !previous.ends_with('\n') {
                            out.push(' ');
                        }
                        self.prefix.increment();
                    }
                    let text = self.render_trimmed(component, here);
                    out.push_str(&text);
                    previous = Some(text);
                }
                self.prefix.down_a_level();
            }
            DocumentCategory::Paragraph => {
                let parts: Vec<String> = document
                    .components
                    .iter()
                    .map(|c| self.render_trimmed(c, here))
                    .collect();
                out.push_str(&parts.join(" "));
                out.push_str("\n\n");
            }
            DocumentCategory::Sentence => out.push_str(element_text(document)),
            DocumentCategory::ListItem => {
                match parent {
                    Some(DocumentCategory::List) => out.push_str(" * "),
                    Some(DocumentCategory::EnumeratedList) => {
                        out.push_str(&self.prefix.prefix());
                        out.push_str(" - ");
                    }
                    _ => {}
                }
                let parts: Vec<String> = document
                    .components
                    .iter()
                    .map(|c| self.render_trimmed(c, here))
                    .collect();
                out.push_str(&parts.join(" "));
                out.push('\n');
            }
        }
        out
    }
}

fn element_text(document: &DocumentElement) -> &str {
    document.realisation.as_deref().unwrap_or("").trim_matches(' ')
}

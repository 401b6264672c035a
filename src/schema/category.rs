use serde::{Deserialize, Serialize};
use std::fmt;

/// Word-level categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LexicalCategory {
    Any,
    Symbol,
    Noun,
    Adjective,
    Adverb,
    Verb,
    Determiner,
    Pronoun,
    Conjunction,
    Preposition,
    Complementiser,
    Modal,
    Auxiliary,
}

impl LexicalCategory {
    /// Parse the category name used in lexicon records ("noun", "verb", ...).
    pub fn from_tag(tag: &str) -> Option<Self> {
        let category = match tag.trim().to_ascii_lowercase().as_str() {
            "any" => Self::Any,
            "symbol" => Self::Symbol,
            "noun" => Self::Noun,
            "adjective" => Self::Adjective,
            "adverb" => Self::Adverb,
            "verb" => Self::Verb,
            "determiner" => Self::Determiner,
            "pronoun" => Self::Pronoun,
            "conjunction" => Self::Conjunction,
            "preposition" => Self::Preposition,
            "complementiser" | "complementizer" => Self::Complementiser,
            "modal" => Self::Modal,
            "auxiliary" => Self::Auxiliary,
            _ => return None,
        };
        Some(category)
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Symbol => "symbol",
            Self::Noun => "noun",
            Self::Adjective => "adjective",
            Self::Adverb => "adverb",
            Self::Verb => "verb",
            Self::Determiner => "determiner",
            Self::Pronoun => "pronoun",
            Self::Conjunction => "conjunction",
            Self::Preposition => "preposition",
            Self::Complementiser => "complementiser",
            Self::Modal => "modal",
            Self::Auxiliary => "auxiliary",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhraseCategory {
    Clause,
    AdjectivePhrase,
    AdverbPhrase,
    NounPhrase,
    PrepositionalPhrase,
    VerbPhrase,
    CannedText,
}

/// Structural categories above the sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentCategory {
    Document,
    Section,
    Paragraph,
    Sentence,
    List,
    EnumeratedList,
    ListItem,
}

impl DocumentCategory {
    /// Whether an element of category `child` may sit directly under this one.
    ///
    /// Non-document children only fit under sentences and list items.
    pub fn has_sub_part(&self, child: Category) -> bool {
        match child {
            Category::Document(doc) => match self {
                Self::Document => doc != Self::Document && doc != Self::ListItem,
                Self::Section => doc == Self::Paragraph || doc == Self::Section,
                Self::Paragraph => doc == Self::Sentence || doc == Self::List,
                Self::List | Self::EnumeratedList => doc == Self::ListItem,
                Self::Sentence | Self::ListItem => false,
            },
            _ => matches!(self, Self::Sentence | Self::ListItem),
        }
    }
}

/// Any element category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Lexical(LexicalCategory),
    Phrase(PhraseCategory),
    Document(DocumentCategory),
}

impl Category {
    pub fn is_lexical(&self, category: LexicalCategory) -> bool {
        *self == Category::Lexical(category)
    }

    pub fn is_phrase(&self, category: PhraseCategory) -> bool {
        *self == Category::Phrase(category)
    }
}

impl From<LexicalCategory> for Category {
    fn from(c: LexicalCategory) -> Self {
        Category::Lexical(c)
    }
}

impl From<PhraseCategory> for Category {
    fn from(c: PhraseCategory) -> Self {
        Category::Phrase(c)
    }
}

impl From<DocumentCategory> for Category {
    fn from(c: DocumentCategory) -> Self {
        Category::Document(c)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Lexical(c) => write!(f, "{:?}", c),
            Category::Phrase(c) => write!(f, "{:?}", c),
            Category::Document(c) => write!(f, "{:?}", c),
        }
    }
}

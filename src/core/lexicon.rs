//! Word lookup: the `Lexicon` trait and the in-memory, RON-backed lexicon.
//!
//! Records are flat: a base form, an optional category and id, and a bag of
//! tags. Bare tags are inflection codes or boolean flags; tags with text are
//! string features.

use once_cell::sync::OnceCell;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::schema::category::LexicalCategory;
use crate::schema::element::WordElement;
use crate::schema::features::{Feature, FeatureValue, Gender, Inflection};

const DEFAULT_LEXICON: &str = include_str!("../../data/default_lexicon.ron");

static ENGLISH: OnceCell<Arc<MemoryLexicon>> = OnceCell::new();

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("unknown lexical category: {0}")]
    UnknownCategory(String),
    #[error("record {index} has no base form")]
    MissingBase { index: usize },
}

/// A dictionary the factory and syntax stage look words up in.
pub trait Lexicon: Send + Sync {
    /// Words with this base form. `LexicalCategory::Any` matches every category.
    fn words(&self, base: &str, category: LexicalCategory) -> Vec<WordElement>;

    fn words_by_id(&self, id: &str) -> Vec<WordElement>;

    /// Words with this inflected or spelling variant.
    fn words_by_variant(&self, variant: &str, category: LexicalCategory) -> Vec<WordElement>;

    fn has_word(&self, base: &str, category: LexicalCategory) -> bool {
        !self.words(base, category).is_empty()
    }

    fn has_word_by_id(&self, id: &str) -> bool {
        !self.words_by_id(id).is_empty()
    }

    fn has_word_by_variant(&self, variant: &str, category: LexicalCategory) -> bool {
        !self.words_by_variant(variant, category).is_empty()
    }

    fn create_word(&self, base: &str, category: LexicalCategory) -> WordElement {
        WordElement::new(base, category)
    }

    /// The word for `base`, tried as a base form, then a variant, then an id.
    /// Never fails: an unknown word is synthesised.
    fn lookup_word(&self, base: &str, category: LexicalCategory) -> WordElement {
        let by_base = self.words(base, category);
        if !by_base.is_empty() {
            return select_matching_word(self, by_base, base);
        }
        let by_variant = self.words_by_variant(base, category);
        if !by_variant.is_empty() {
            return select_matching_word(self, by_variant, base);
        }
        match self.words_by_id(base).into_iter().next() {
            Some(word) => word,
            None => self.create_word(base, category),
        }
    }

    fn word(&self, base: &str, category: LexicalCategory) -> WordElement {
        let words = self.words(base, category);
        if words.is_empty() {
            return self.create_word(base, category);
        }
        select_matching_word(self, words, base)
    }

    fn word_by_id(&self, id: &str) -> WordElement {
        match self.words_by_id(id).into_iter().next() {
            Some(word) => word,
            None => self.create_word(id, LexicalCategory::Any),
        }
    }
}

/// Prefer an exact base-form match. Case-only matches yield a fresh
/// `Any` word rather than borrowing the other casing's entry.
fn select_matching_word<L: Lexicon + ?Sized>(
    lexicon: &L,
    mut words: Vec<WordElement>,
    base: &str,
) -> WordElement {
    if let Some(index) = words.iter().position(|w| w.base_form == base) {
        return words.swap_remove(index);
    }
    match words.into_iter().next() {
        Some(first) if first.base_form.to_lowercase() == base.to_lowercase() => {
            lexicon.create_word(base, LexicalCategory::Any)
        }
        Some(first) => first,
        None => lexicon.create_word(base, LexicalCategory::Any),
    }
}

/// One lexicon record as written in RON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename = "Word")]
pub struct LexiconRecord {
    #[serde(default)]
    pub base: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl LexiconRecord {
    /// Convert into a word, returning it with the tags that had no
    /// feature key.
    pub fn to_word(&self, index: usize) -> Result<(WordElement, Vec<String>), LexiconError> {
        let base = self
            .base
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .ok_or(LexiconError::MissingBase { index })?;
        let category = match self.category.as_deref() {
            Some(tag) => LexicalCategory::from_tag(tag)
                .ok_or_else(|| LexiconError::UnknownCategory(tag.to_string()))?,
            None => LexicalCategory::Any,
        };

        let mut word = WordElement::new(base, category);
        word.id = self.id.clone();
        let mut unknown = Vec::new();

        for (tag, value) in &self.tags {
            let tag = tag.trim();
            let value = value.trim();
            if value.is_empty() {
                if let Some(inflection) = Inflection::from_code(tag) {
                    word.inflections.push(inflection);
                    continue;
                }
            }
            let Some(feature) = Feature::from_lexicon_tag(tag) else {
                unknown.push(tag.to_string());
                word.tags.insert(tag.to_string(), value.to_string());
                continue;
            };
            if value.is_empty() {
                word.features.set(feature, true);
            } else if feature == Feature::Gender {
                match parse_gender(value) {
                    Some(gender) => word.features.set(feature, gender),
                    None => word.features.set(feature, value),
                }
            } else {
                word.features.set(feature, value);
            }
        }

        if word.inflections.is_empty() {
            word.inflections.push(Inflection::Regular);
        }
        let default = if word.inflections.contains(&Inflection::Regular) {
            Inflection::Regular
        } else {
            word.inflections[0]
        };
        word.features
            .set(Feature::DefaultInflection, FeatureValue::Inflection(default));
        Ok((word, unknown))
    }
}

fn parse_gender(value: &str) -> Option<Gender> {
    match value.to_ascii_lowercase().as_str() {
        "masculine" => Some(Gender::Masculine),
        "feminine" => Some(Gender::Feminine),
        "neuter" => Some(Gender::Neuter),
        _ => None,
    }
}

/// RON options shared by lexicon and config files: optional fields take bare
/// values, so `base: "be"` reads as `Some("be")`.
pub fn ron_options() -> ron::Options {
    ron::Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse raw records without converting them.
pub fn parse_records(input: &str) -> Result<Vec<LexiconRecord>, LexiconError> {
    Ok(ron_options().from_str(input)?)
}

/// In-memory lexicon indexed by base form, id and variant.
#[derive(Debug, Default)]
pub struct MemoryLexicon {
    words: Vec<WordElement>,
    by_base: FxHashMap<String, Vec<usize>>,
    by_id: FxHashMap<String, usize>,
    by_variant: FxHashMap<String, Vec<usize>>,
}

impl MemoryLexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// The bundled English lexicon, parsed on first use.
    pub fn english() -> Result<Arc<MemoryLexicon>, LexiconError> {
        ENGLISH
            .get_or_try_init(|| Self::parse_ron(DEFAULT_LEXICON).map(Arc::new))
            .cloned()
    }

    pub fn load_from_ron(path: &Path) -> Result<MemoryLexicon, LexiconError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn parse_ron(input: &str) -> Result<MemoryLexicon, LexiconError> {
        let records = parse_records(input)?;
        let mut lexicon = MemoryLexicon::new();
        for (index, record) in records.iter().enumerate() {
            let (word, unknown) = record.to_word(index)?;
            for tag in unknown {
                warn!(word = %word.base_form, tag = %tag, "unknown lexicon tag");
            }
            lexicon.add_word(word);
        }
        lexicon.add_special_cases();
        debug!(
            words = lexicon.words.len(),
            ids = lexicon.by_id.len(),
            variants = lexicon.by_variant.len(),
            "lexicon loaded"
        );
        Ok(lexicon)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WordElement> {
        self.words.iter()
    }

    /// Index a word. A duplicate id keeps the first word under that id.
    pub fn add_word(&mut self, word: WordElement) {
        let index = self.words.len();
        self.by_base.entry(word.base_form.clone()).or_default().push(index);
        if let Some(id) = word.id.as_ref().filter(|id| !id.is_empty()) {
            if self.by_id.contains_key(id) {
                warn!(id = %id, word = %word.base_form, "lexicon id occurs more than once");
            } else {
                self.by_id.insert(id.clone(), index);
            }
        }
        for variant in variants(&word) {
            let entry = self.by_variant.entry(variant).or_default();
            if !entry.contains(&index) {
                entry.push(index);
            }
        }
        self.words.push(word);
    }

    fn add_special_cases(&mut self) {
        let Some(&be) = self
            .by_base
            .get("be")
            .and_then(|ids| ids.iter().find(|&&i| self.words[i].category == LexicalCategory::Verb))
        else {
            return;
        };
        for form in ["is", "am", "are", "was", "were"] {
            let entry = self.by_variant.entry(form.to_string()).or_default();
            if !entry.contains(&be) {
                entry.push(be);
            }
        }
    }

    fn collect(&self, indices: Option<&Vec<usize>>, category: LexicalCategory) -> Vec<WordElement> {
        indices
            .into_iter()
            .flatten()
            .map(|&i| &self.words[i])
            .filter(|w| category == LexicalCategory::Any || w.category == category)
            .cloned()
            .collect()
    }
}

impl Lexicon for MemoryLexicon {
    fn words(&self, base: &str, category: LexicalCategory) -> Vec<WordElement> {
        self.collect(self.by_base.get(base), category)
    }

    fn words_by_id(&self, id: &str) -> Vec<WordElement> {
        self.by_id
            .get(id)
            .map(|&i| vec![self.words[i].clone()])
            .unwrap_or_default()
    }

    fn words_by_variant(&self, variant: &str, category: LexicalCategory) -> Vec<WordElement> {
        self.collect(self.by_variant.get(variant), category)
    }
}

/// Forms a word is indexed under besides its base.
fn variants(word: &WordElement) -> Vec<String> {
    let mut out = vec![word.base_form.clone()];
    let mut push = |feature: Feature, suffix: &str| {
        let form = match word.features.text(feature) {
            Some(text) => text.to_string(),
            None => suffixed_form(&word.base_form, suffix),
        };
        if !out.contains(&form) {
            out.push(form);
        }
    };
    match word.category {
        LexicalCategory::Noun => push(Feature::Plural, "s"),
        LexicalCategory::Adjective => {
            push(Feature::Comparative, "er");
            push(Feature::Superlative, "est");
        }
        LexicalCategory::Verb => {
            push(Feature::Present3s, "s");
            push(Feature::Past, "ed");
            push(Feature::PastParticiple, "ed");
            push(Feature::PresentParticiple, "ing");
        }
        _ => {}
    }
    out
}

/// Attach a suffix with the spelling adjustments used for variant keys.
pub fn suffixed_form(base: &str, suffix: &str) -> String {
    let mut stem = base.to_string();
    if stem.ends_with('y') && !suffix.starts_with('i') {
        stem.pop();
        stem.push_str("ie");
    }
    if stem.ends_with('e') && (suffix.starts_with('e') || suffix.starts_with('i')) {
        stem.pop();
    }
    if suffix.starts_with('s')
        && ["s", "x", "z", "ch", "sh"].iter().any(|end| stem.ends_with(end))
    {
        stem.push('e');
    }
    stem + suffix
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = r#"[
        (base: "give", category: "verb", id: "E1", tags: {"irreg": "", "past": "gave", "pastParticiple": "given", "ditransitive": ""}),
        (base: "carry", category: "verb", id: "E2", tags: {}),
        (base: "box", category: "noun", id: "E3", tags: {}),
        (base: "be", category: "verb", id: "E4", tags: {"irreg": ""}),
        (base: "Bill", category: "noun", id: "E5", tags: {"proper": ""}),
        (base: "cactus", category: "noun", id: "E6", tags: {"glreg": "", "reg": "", "oddity": "x"}),
    ]"#;

    #[test]
    fn suffix_spelling() {
        assert_eq!(suffixed_form("carry", "ed"), "carried");
        assert_eq!(suffixed_form("carry", "ing"), "carrying");
        assert_eq!(suffixed_form("box", "s"), "boxes");
        assert_eq!(suffixed_form("love", "ed"), "loved");
        assert_eq!(suffixed_form("want", "s"), "wants");
    }

    #[test]
    fn optional_fields_take_bare_strings() {
        let records = parse_records(r#"[(base: "be", category: "verb", id: "E4")]"#).unwrap();
        assert_eq!(records[0].base.as_deref(), Some("be"));
        assert_eq!(records[0].category.as_deref(), Some("verb"));
        assert_eq!(records[0].id.as_deref(), Some("E4"));
        assert!(records[0].tags.is_empty());

        let wrapped = parse_records(r#"[(base: Some("be"), id: None)]"#).unwrap();
        assert_eq!(wrapped[0].base.as_deref(), Some("be"));
        assert_eq!(wrapped[0].id, None);
    }

    #[test]
    fn bundled_records_all_convert() {
        let records = parse_records(DEFAULT_LEXICON).unwrap();
        assert!(records.len() > 100);
        for (index, record) in records.iter().enumerate() {
            let (word, unknown) = record.to_word(index).unwrap();
            assert!(unknown.is_empty(), "{}: unknown tags {:?}", word.base_form, unknown);
        }
    }

    #[test]
    fn records_convert_tags() {
        let lex = MemoryLexicon::parse_ron(SMALL).unwrap();
        let give = lex.word("give", LexicalCategory::Verb);
        assert_eq!(give.features.text(Feature::Past), Some("gave"));
        assert!(give.features.flag(Feature::Ditransitive));
        assert_eq!(give.default_inflection(), Some(Inflection::Irregular));

        let cactus = lex.word("cactus", LexicalCategory::Noun);
        assert_eq!(cactus.default_inflection(), Some(Inflection::Regular));
        assert_eq!(cactus.inflections.len(), 2);
        assert_eq!(cactus.tags.get("oddity").map(String::as_str), Some("x"));
    }

    #[test]
    fn variants_find_base_words() {
        let lex = MemoryLexicon::parse_ron(SMALL).unwrap();
        assert_eq!(lex.lookup_word("gave", LexicalCategory::Verb).base_form, "give");
        assert_eq!(lex.lookup_word("carried", LexicalCategory::Verb).base_form, "carry");
        assert_eq!(lex.lookup_word("boxes", LexicalCategory::Any).base_form, "box");
        assert_eq!(lex.lookup_word("were", LexicalCategory::Verb).base_form, "be");
        assert_eq!(lex.lookup_word("E3", LexicalCategory::Any).base_form, "box");
    }

    #[test]
    fn unknown_words_are_synthesised() {
        let lex = MemoryLexicon::parse_ron(SMALL).unwrap();
        let word = lex.lookup_word("flibber", LexicalCategory::Noun);
        assert_eq!(word.base_form, "flibber");
        assert_eq!(word.category, LexicalCategory::Noun);
        assert!(word.id.is_none());
    }

    #[test]
    fn case_only_match_synthesises_any_word() {
        let mut lex = MemoryLexicon::new();
        lex.add_word(WordElement::new("bill", LexicalCategory::Noun));
        let mut upper = WordElement::new("Bill", LexicalCategory::Noun);
        upper.id = Some("x".into());
        lex.add_word(upper);
        let words = vec![lex.words("bill", LexicalCategory::Noun)[0].clone()];
        let picked = select_matching_word(&lex, words, "BILL");
        assert_eq!(picked.category, LexicalCategory::Any);
        assert_eq!(picked.base_form, "BILL");
    }

    #[test]
    fn duplicate_ids_keep_first() {
        let input = r#"[
            (base: "one", category: "noun", id: "D", tags: {}),
            (base: "two", category: "noun", id: "D", tags: {}),
        ]"#;
        let lex = MemoryLexicon::parse_ron(input).unwrap();
        assert_eq!(lex.words_by_id("D")[0].base_form, "one");
        assert_eq!(lex.len(), 2);
    }

    #[test]
    fn bad_records_are_rejected() {
        let missing = r#"[(category: "noun", tags: {})]"#;
        assert!(matches!(
            MemoryLexicon::parse_ron(missing),
            Err(LexiconError::MissingBase { index: 0 })
        ));
        let unknown = r#"[(base: "x", category: "gerundive", tags: {})]"#;
        assert!(matches!(
            MemoryLexicon::parse_ron(unknown),
            Err(LexiconError::UnknownCategory(_))
        ));
    }

    #[test]
    fn bundled_lexicon_loads_once() {
        let a = MemoryLexicon::english().unwrap();
        let b = MemoryLexicon::english().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(a.has_word("be", LexicalCategory::Verb));
    }
}

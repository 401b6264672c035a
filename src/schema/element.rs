//! The element tree every stage reads and rewrites.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;

use super::category::{Category, DocumentCategory, LexicalCategory, PhraseCategory};
use super::document::DocumentElement;
use super::features::{
    ClauseStatus, DiscourseFunction, Feature, FeatureKind, FeatureMap, FeatureValue, Form,
    Gender, Inflection, InterrogativeType, NumberAgreement, Person, Tense,
};

/// Read/write access to an element's features.
///
/// `set_feature` and `clear_feature` are the two write primitives; clauses
/// override them to forward verb-phrase features.
pub trait HasFeatures {
    fn feature_map(&self) -> &FeatureMap;
    fn feature_map_mut(&mut self) -> &mut FeatureMap;

    fn feature(&self, key: Feature) -> Option<&FeatureValue> {
        self.feature_map().get(key)
    }

    fn set_feature(&mut self, key: Feature, value: FeatureValue) {
        self.feature_map_mut().set(key, value);
    }

    fn clear_feature(&mut self, key: Feature) {
        self.feature_map_mut().remove(key);
    }

    fn set(&mut self, key: Feature, value: impl Into<FeatureValue>)
    where
        Self: Sized,
    {
        self.set_feature(key, value.into());
    }

    /// Copy semantics: `None` clears the feature.
    fn set_opt(&mut self, key: Feature, value: Option<FeatureValue>) {
        match value {
            Some(v) => self.set_feature(key, v),
            None => self.clear_feature(key),
        }
    }

    fn has(&self, key: Feature) -> bool {
        self.feature(key).is_some()
    }

    fn feature_as<T: FeatureKind>(&self, key: Feature) -> Option<T>
    where
        Self: Sized,
    {
        self.feature(key).and_then(T::from_value)
    }

    fn flag(&self, key: Feature) -> bool {
        self.feature(key).is_some_and(FeatureValue::as_bool)
    }

    fn text(&self, key: Feature) -> Option<&str> {
        self.feature(key).and_then(FeatureValue::as_text)
    }

    fn tense(&self) -> Option<Tense>
    where
        Self: Sized,
    {
        self.feature_as(Feature::Tense)
    }

    fn form(&self) -> Option<Form>
    where
        Self: Sized,
    {
        self.feature_as(Feature::Form)
    }

    fn number(&self) -> Option<NumberAgreement>
    where
        Self: Sized,
    {
        self.feature_as(Feature::Number)
    }

    fn person(&self) -> Option<Person>
    where
        Self: Sized,
    {
        self.feature_as(Feature::Person)
    }

    fn gender(&self) -> Option<Gender>
    where
        Self: Sized,
    {
        self.feature_as(Feature::Gender)
    }

    fn function(&self) -> Option<DiscourseFunction>
    where
        Self: Sized,
    {
        self.feature_as(Feature::DiscourseFunction)
    }

    fn interrogative_type(&self) -> Option<InterrogativeType>
    where
        Self: Sized,
    {
        self.feature_as(Feature::InterrogativeType)
    }

    fn clause_status(&self) -> Option<ClauseStatus>
    where
        Self: Sized,
    {
        self.feature_as(Feature::ClauseStatus)
    }

    fn set_function(&mut self, function: DiscourseFunction)
    where
        Self: Sized,
    {
        self.set(Feature::DiscourseFunction, function);
    }

    fn is_plural(&self) -> bool
    where
        Self: Sized,
    {
        self.number() == Some(NumberAgreement::Plural)
    }
}

/// A dictionary lexeme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordElement {
    pub base_form: String,
    #[serde(default)]
    pub id: Option<String>,
    pub category: LexicalCategory,
    #[serde(default)]
    pub features: FeatureMap,
    #[serde(default)]
    pub inflections: Vec<Inflection>,
    /// Lexicon tags with no feature key of their own.
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl WordElement {
    pub fn new(base_form: impl Into<String>, category: LexicalCategory) -> Self {
        Self {
            base_form: base_form.into(),
            id: None,
            category,
            features: FeatureMap::new(),
            inflections: Vec::new(),
            tags: BTreeMap::new(),
        }
    }

    pub fn default_spelling(&self) -> &str {
        self.features
            .text(Feature::DefaultSpelling)
            .unwrap_or(&self.base_form)
    }

    pub fn default_inflection(&self) -> Option<Inflection> {
        self.features.get_as(Feature::DefaultInflection)
    }
}

impl HasFeatures for WordElement {
    fn feature_map(&self) -> &FeatureMap {
        &self.features
    }
    fn feature_map_mut(&mut self) -> &mut FeatureMap {
        &mut self.features
    }
}

/// One sentence-bound occurrence of a word, carrying local features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InflectedWord {
    pub base_form: String,
    pub category: LexicalCategory,
    #[serde(default)]
    pub base_word: Option<Box<WordElement>>,
    #[serde(default)]
    pub features: FeatureMap,
}

impl InflectedWord {
    pub fn new(base_form: impl Into<String>, category: LexicalCategory) -> Self {
        Self {
            base_form: base_form.into(),
            category,
            base_word: None,
            features: FeatureMap::new(),
        }
    }

    /// An occurrence of `word` with no local features yet.
    pub fn from_word(word: WordElement) -> Self {
        Self {
            base_form: word.default_spelling().to_string(),
            category: word.category,
            base_word: Some(Box::new(word)),
            features: FeatureMap::new(),
        }
    }

    /// Read a lexical text feature locally, falling back to the base word.
    pub fn lexical_text(&self, key: Feature) -> Option<&str> {
        self.features
            .text(key)
            .or_else(|| self.base_word.as_ref().and_then(|w| w.features.text(key)))
    }
}

impl HasFeatures for InflectedWord {
    fn feature_map(&self) -> &FeatureMap {
        &self.features
    }
    fn feature_map_mut(&mut self) -> &mut FeatureMap {
        &mut self.features
    }
}

/// A phrase or clause specification.
///
/// Which slots are used depends on the category: subjects, verb phrase,
/// front modifiers, cue phrase and complementiser belong to clauses; the
/// specifier to noun phrases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhraseElement {
    pub category: PhraseCategory,
    #[serde(default)]
    pub features: FeatureMap,
    #[serde(default)]
    pub head: Option<Box<Element>>,
    #[serde(default)]
    pub specifier: Option<Box<Element>>,
    #[serde(default)]
    pub premodifiers: Vec<Element>,
    #[serde(default)]
    pub postmodifiers: Vec<Element>,
    #[serde(default)]
    pub front_modifiers: Vec<Element>,
    #[serde(default)]
    pub complements: Vec<Element>,
    #[serde(default)]
    pub subjects: Vec<Element>,
    #[serde(default)]
    pub verb_phrase: Option<Box<Element>>,
    #[serde(default)]
    pub cue_phrase: Option<Box<Element>>,
    #[serde(default)]
    pub complementiser: Option<Box<Element>>,
}

impl PhraseElement {
    pub fn new(category: PhraseCategory) -> Self {
        Self {
            category,
            features: FeatureMap::new(),
            head: None,
            specifier: None,
            premodifiers: Vec::new(),
            postmodifiers: Vec::new(),
            front_modifiers: Vec::new(),
            complements: Vec::new(),
            subjects: Vec::new(),
            verb_phrase: None,
            cue_phrase: None,
            complementiser: None,
        }
    }

    pub fn is_clause(&self) -> bool {
        self.category == PhraseCategory::Clause
    }

    /// The verb of a clause: its verb phrase, or its head when no verb
    /// phrase slot is filled.
    pub fn verb_element(&self) -> Option<&Element> {
        self.verb_phrase.as_deref().or(self.head.as_deref())
    }

    pub fn verb_element_mut(&mut self) -> Option<&mut Element> {
        match self.verb_phrase {
            Some(ref mut vp) => Some(vp.as_mut()),
            None => self.head.as_deref_mut(),
        }
    }

    /// Children in realisation order.
    pub fn children(&self) -> Vec<&Element> {
        let mut out: Vec<&Element> = Vec::new();
        match self.category {
            PhraseCategory::Clause => {
                out.extend(self.cue_phrase.as_deref());
                out.extend(self.front_modifiers.iter());
                out.extend(self.premodifiers.iter());
                out.extend(self.subjects.iter());
                out.extend(self.verb_phrase.as_deref());
                out.extend(self.complements.iter());
            }
            PhraseCategory::NounPhrase => {
                out.extend(self.specifier.as_deref());
                out.extend(self.premodifiers.iter());
                out.extend(self.head.as_deref());
                out.extend(self.complements.iter());
                out.extend(self.postmodifiers.iter());
            }
            _ => {
                out.extend(self.premodifiers.iter());
                out.extend(self.head.as_deref());
                out.extend(self.complements.iter());
                out.extend(self.postmodifiers.iter());
            }
        }
        out
    }
}

impl HasFeatures for PhraseElement {
    fn feature_map(&self) -> &FeatureMap {
        &self.features
    }
    fn feature_map_mut(&mut self) -> &mut FeatureMap {
        &mut self.features
    }

    fn feature(&self, key: Feature) -> Option<&FeatureValue> {
        let own = self.features.get(key);
        if own.is_some() || !self.is_clause() || !key.is_verb_phrase_feature() {
            return own;
        }
        self.verb_phrase.as_deref().and_then(|vp| vp.feature(key))
    }

    fn set_feature(&mut self, key: Feature, value: FeatureValue) {
        if self.is_clause() && key.is_verb_phrase_feature() {
            if let Some(vp) = self.verb_phrase.as_deref_mut() {
                vp.set_feature(key, value.clone());
            }
        }
        self.features.set(key, value);
    }

    fn clear_feature(&mut self, key: Feature) {
        if self.is_clause() && key.is_verb_phrase_feature() {
            if let Some(vp) = self.verb_phrase.as_deref_mut() {
                vp.clear_feature(key);
            }
        }
        self.features.remove(key);
    }
}

/// Coordinated phrases ("the dog and the cat").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinatedPhrase {
    #[serde(default)]
    pub features: FeatureMap,
    #[serde(default)]
    pub coordinates: Vec<Element>,
    #[serde(default = "default_conjunction")]
    pub conjunction: Option<String>,
    #[serde(default)]
    pub specifier: Option<Box<Element>>,
    #[serde(default)]
    pub premodifiers: Vec<Element>,
    #[serde(default)]
    pub postmodifiers: Vec<Element>,
    #[serde(default)]
    pub complements: Vec<Element>,
}

fn default_conjunction() -> Option<String> {
    Some("and".to_string())
}

impl CoordinatedPhrase {
    pub fn new(coordinates: Vec<Element>) -> Self {
        Self {
            features: FeatureMap::new(),
            coordinates,
            conjunction: default_conjunction(),
            specifier: None,
            premodifiers: Vec::new(),
            postmodifiers: Vec::new(),
            complements: Vec::new(),
        }
    }

    /// Plurality is derived: a sole coordinate decides for itself, otherwise
    /// only "and" makes the group plural.
    pub fn check_if_plural(&self) -> bool {
        if self.coordinates.len() == 1 {
            self.coordinates[0].is_plural()
        } else {
            self.conjunction.as_deref() == Some("and")
        }
    }
}

impl HasFeatures for CoordinatedPhrase {
    fn feature_map(&self) -> &FeatureMap {
        &self.features
    }
    fn feature_map_mut(&mut self) -> &mut FeatureMap {
        &mut self.features
    }
}

/// Opaque canned text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringElement {
    pub text: String,
    #[serde(default = "canned_category")]
    pub category: Category,
    #[serde(default)]
    pub features: FeatureMap,
}

fn canned_category() -> Category {
    Category::Phrase(PhraseCategory::CannedText)
}

impl StringElement {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: canned_category(),
            features: FeatureMap::new(),
        }
    }

    pub fn with_function(text: impl Into<String>, function: Option<DiscourseFunction>) -> Self {
        let mut element = Self::new(text);
        element
            .features
            .set_opt(Feature::DiscourseFunction, function.map(FeatureValue::from));
        element
    }
}

impl HasFeatures for StringElement {
    fn feature_map(&self) -> &FeatureMap {
        &self.features
    }
    fn feature_map_mut(&mut self) -> &mut FeatureMap {
        &mut self.features
    }
}

/// Structural grouping that keeps constituent boundaries between stages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListElement {
    #[serde(default)]
    pub features: FeatureMap,
    #[serde(default)]
    pub components: Vec<Element>,
}

impl ListElement {
    pub fn new(components: Vec<Element>) -> Self {
        Self {
            features: FeatureMap::new(),
            components,
        }
    }
}

impl HasFeatures for ListElement {
    fn feature_map(&self) -> &FeatureMap {
        &self.features
    }
    fn feature_map_mut(&mut self) -> &mut FeatureMap {
        &mut self.features
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Element {
    Word(WordElement),
    Inflected(InflectedWord),
    Phrase(PhraseElement),
    Coordinated(CoordinatedPhrase),
    Canned(StringElement),
    List(ListElement),
    Document(DocumentElement),
}

impl Element {
    pub fn canned(text: impl Into<String>) -> Self {
        Element::Canned(StringElement::new(text))
    }

    pub fn list(components: Vec<Element>) -> Self {
        Element::List(ListElement::new(components))
    }

    /// `None` for lists and coordinations, which have no category of their own.
    pub fn category(&self) -> Option<Category> {
        match self {
            Element::Word(w) => Some(Category::Lexical(w.category)),
            Element::Inflected(w) => Some(Category::Lexical(w.category)),
            Element::Phrase(p) => Some(Category::Phrase(p.category)),
            Element::Canned(s) => Some(s.category),
            Element::Document(d) => Some(Category::Document(d.category)),
            Element::Coordinated(_) | Element::List(_) => None,
        }
    }

    pub fn is_lexical(&self, category: LexicalCategory) -> bool {
        self.category() == Some(Category::Lexical(category))
    }

    pub fn is_phrase(&self, category: PhraseCategory) -> bool {
        self.category() == Some(Category::Phrase(category))
    }

    pub fn is_document(&self, category: DocumentCategory) -> bool {
        self.category() == Some(Category::Document(category))
    }

    /// Base form of word elements.
    pub fn base_form(&self) -> Option<&str> {
        match self {
            Element::Word(w) => Some(&w.base_form),
            Element::Inflected(w) => Some(&w.base_form),
            _ => None,
        }
    }

    /// The realised text, trimmed of surrounding spaces. Empty for
    /// elements that carry no realisation.
    pub fn realisation(&self) -> &str {
        match self {
            Element::Canned(s) => s.text.trim_matches(' '),
            Element::Document(d) => d.realisation.as_deref().unwrap_or("").trim_matches(' '),
            _ => "",
        }
    }

    pub fn set_realisation(&mut self, text: impl Into<String>) {
        match self {
            Element::Canned(s) => s.text = text.into(),
            Element::Document(d) => d.realisation = Some(text.into()),
            _ => {}
        }
    }

    pub fn children(&self) -> Vec<&Element> {
        match self {
            Element::Word(_) | Element::Inflected(_) | Element::Canned(_) => Vec::new(),
            Element::Phrase(p) => p.children(),
            Element::Coordinated(c) => c.coordinates.iter().collect(),
            Element::List(l) => l.components.iter().collect(),
            Element::Document(d) => d.components.iter().collect(),
        }
    }

    /// Indented dump of the tree, for trace logging.
    pub fn print_tree(&self) -> String {
        let mut out = String::new();
        self.print_into("", &mut out);
        out
    }

    fn print_into(&self, indent: &str, out: &mut String) {
        let _ = match self {
            Element::Word(w) => writeln!(out, "{indent}WordElement: {} ({:?})", w.base_form, w.category),
            Element::Inflected(w) => writeln!(
                out,
                "{indent}InflectedWordElement: {} ({:?}){}",
                w.base_form,
                w.category,
                describe_features(&w.features)
            ),
            Element::Phrase(p) => writeln!(
                out,
                "{indent}PhraseElement: {:?}{}",
                p.category,
                describe_features(&p.features)
            ),
            Element::Coordinated(c) => writeln!(
                out,
                "{indent}CoordinatedPhraseElement: {}{}",
                c.conjunction.as_deref().unwrap_or(""),
                describe_features(&c.features)
            ),
            Element::Canned(s) => writeln!(out, "{indent}StringElement: '{}'", s.text),
            Element::List(l) => writeln!(out, "{indent}ListElement{}", describe_features(&l.features)),
            Element::Document(d) => writeln!(
                out,
                "{indent}DocumentElement: {:?} '{}'",
                d.category,
                d.realisation.as_deref().unwrap_or("")
            ),
        };
        let child_indent = format!("{indent}  ");
        for child in self.children() {
            child.print_into(&child_indent, out);
        }
    }
}

fn describe_features(features: &FeatureMap) -> String {
    if features.is_empty() {
        return String::new();
    }
    let mut parts: Vec<String> = features
        .iter()
        .map(|(k, v)| format!("{:?}={:?}", k, v))
        .collect();
    parts.sort();
    format!(" [{}]", parts.join(", "))
}

impl HasFeatures for Element {
    fn feature_map(&self) -> &FeatureMap {
        match self {
            Element::Word(e) => &e.features,
            Element::Inflected(e) => &e.features,
            Element::Phrase(e) => &e.features,
            Element::Coordinated(e) => &e.features,
            Element::Canned(e) => &e.features,
            Element::List(e) => &e.features,
            Element::Document(e) => &e.features,
        }
    }

    fn feature_map_mut(&mut self) -> &mut FeatureMap {
        match self {
            Element::Word(e) => &mut e.features,
            Element::Inflected(e) => &mut e.features,
            Element::Phrase(e) => &mut e.features,
            Element::Coordinated(e) => &mut e.features,
            Element::Canned(e) => &mut e.features,
            Element::List(e) => &mut e.features,
            Element::Document(e) => &mut e.features,
        }
    }

    fn feature(&self, key: Feature) -> Option<&FeatureValue> {
        match self {
            Element::Phrase(p) => p.feature(key),
            other => other.feature_map().get(key),
        }
    }

    fn set_feature(&mut self, key: Feature, value: FeatureValue) {
        match self {
            Element::Phrase(p) => p.set_feature(key, value),
            other => other.feature_map_mut().set(key, value),
        }
    }

    fn clear_feature(&mut self, key: Feature) {
        match self {
            Element::Phrase(p) => p.clear_feature(key),
            other => {
                other.feature_map_mut().remove(key);
            }
        }
    }
}

impl From<WordElement> for Element {
    fn from(w: WordElement) -> Self {
        Element::Word(w)
    }
}

impl From<InflectedWord> for Element {
    fn from(w: InflectedWord) -> Self {
        Element::Inflected(w)
    }
}

impl From<PhraseElement> for Element {
    fn from(p: PhraseElement) -> Self {
        Element::Phrase(p)
    }
}

impl From<CoordinatedPhrase> for Element {
    fn from(c: CoordinatedPhrase) -> Self {
        Element::Coordinated(c)
    }
}

impl From<StringElement> for Element {
    fn from(s: StringElement) -> Self {
        Element::Canned(s)
    }
}

impl From<ListElement> for Element {
    fn from(l: ListElement) -> Self {
        Element::List(l)
    }
}

impl From<DocumentElement> for Element {
    fn from(d: DocumentElement) -> Self {
        Element::Document(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clause_with_vp() -> PhraseElement {
        let mut clause = PhraseElement::new(PhraseCategory::Clause);
        let mut vp = PhraseElement::new(PhraseCategory::VerbPhrase);
        vp.head = Some(Box::new(WordElement::new("kiss", LexicalCategory::Verb).into()));
        clause.verb_phrase = Some(Box::new(vp.into()));
        clause
    }

    #[test]
    fn clause_forwards_verb_features() {
        let mut clause = clause_with_vp();
        clause.set(Feature::Tense, Tense::Past);
        clause.set(Feature::Elided, false);
        let vp = clause.verb_phrase.as_deref().unwrap();
        assert_eq!(vp.tense(), Some(Tense::Past));
        assert!(!vp.has(Feature::Elided));
    }

    #[test]
    fn clause_reads_fall_back_to_verb_phrase() {
        let mut clause = clause_with_vp();
        clause
            .verb_phrase
            .as_deref_mut()
            .unwrap()
            .set(Feature::Progressive, true);
        assert!(clause.flag(Feature::Progressive));
        assert!(!clause.features.contains(Feature::Progressive));
    }

    #[test]
    fn clearing_on_clause_clears_verb_phrase() {
        let mut clause = clause_with_vp();
        clause.set(Feature::Modal, "can");
        clause.set_opt(Feature::Modal, None);
        assert!(!clause.has(Feature::Modal));
        assert!(!clause.verb_phrase.as_deref().unwrap().has(Feature::Modal));
    }

    #[test]
    fn coordination_plurality_is_derived() {
        let dog = Element::canned("the dog");
        let cat = Element::canned("the cat");
        let mut both = CoordinatedPhrase::new(vec![dog.clone(), cat]);
        assert!(both.check_if_plural());
        both.conjunction = Some("or".to_string());
        assert!(!both.check_if_plural());

        let mut dogs = dog;
        dogs.set(Feature::Number, NumberAgreement::Plural);
        assert!(CoordinatedPhrase::new(vec![dogs]).check_if_plural());
    }

    #[test]
    fn realisation_is_trimmed_of_spaces() {
        let text = Element::canned("  the man ");
        assert_eq!(text.realisation(), "the man");
        assert_eq!(Element::list(vec![]).realisation(), "");
    }

    #[test]
    fn tree_dump_lists_children() {
        let clause: Element = clause_with_vp().into();
        let dump = clause.print_tree();
        assert!(dump.contains("PhraseElement: Clause"));
        assert!(dump.contains("    WordElement: kiss (Verb)"));
    }
}

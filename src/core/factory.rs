//! Phrase-specification builders.
//!
//! The factory turns text and elements into the trees the realiser consumes.
//! Text is classified as a dictionary word when the lexicon knows it, when
//! it is a personal pronoun, or when it is a single run of word characters;
//! anything else becomes canned text.

use crate::core::lexicon::Lexicon;
use crate::schema::category::{DocumentCategory, LexicalCategory, PhraseCategory};
use crate::schema::document::DocumentElement;
use crate::schema::element::{
    CoordinatedPhrase, Element, HasFeatures, InflectedWord, PhraseElement, StringElement,
    WordElement,
};
use crate::schema::features::{
    ClauseStatus, Feature, Form, Gender, NumberAgreement, Person, Tense,
};

const PRONOUNS: &[&str] = &[
    "I", "you", "he", "she", "it", "me", "him", "her", "myself", "yourself", "himself",
    "herself", "itself", "mine", "yours", "his", "hers", "its", "we", "they", "us", "them",
    "ourselves", "yourselves", "themselves", "ours", "theirs", "there",
];
const FIRST_PERSON: &[&str] = &["I", "me", "myself", "we", "us", "ourselves", "mine", "my", "ours", "our"];
const SECOND_PERSON: &[&str] = &["you", "yourself", "yourselves", "yours", "your"];
const REFLEXIVE: &[&str] = &[
    "myself", "yourself", "himself", "herself", "itself", "ourselves", "yourselves", "themselves",
];
const MASCULINE: &[&str] = &["he", "him", "himself", "his"];
const FEMININE: &[&str] = &["she", "her", "herself", "hers"];
const POSSESSIVE: &[&str] = &[
    "mine", "ours", "yours", "his", "hers", "its", "theirs", "my", "our", "your", "her", "their",
];
const PLURAL: &[&str] = &["we", "us", "ourselves", "ours", "our", "they", "them", "theirs", "their"];
const EXPLETIVE: &str = "there";

/// Builder input: text to classify, a finished element, or nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Text(String),
    Element(Element),
    Empty,
}

impl From<&str> for Input {
    fn from(text: &str) -> Self {
        Input::Text(text.to_string())
    }
}

impl From<String> for Input {
    fn from(text: String) -> Self {
        Input::Text(text)
    }
}

impl From<&String> for Input {
    fn from(text: &String) -> Self {
        Input::Text(text.clone())
    }
}

impl From<()> for Input {
    fn from(_: ()) -> Self {
        Input::Empty
    }
}

impl<T: Into<Input>> From<Option<T>> for Input {
    fn from(value: Option<T>) -> Self {
        value.map_or(Input::Empty, Into::into)
    }
}

macro_rules! element_input {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Input {
                fn from(value: $ty) -> Self {
                    Input::Element(value.into())
                }
            }
        )*
    };
}

element_input!(
    Element,
    WordElement,
    InflectedWord,
    PhraseElement,
    CoordinatedPhrase,
    StringElement,
    DocumentElement
);

pub struct NlgFactory<'a> {
    lexicon: &'a dyn Lexicon,
}

impl<'a> NlgFactory<'a> {
    pub fn new(lexicon: &'a dyn Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &'a dyn Lexicon {
        self.lexicon
    }

    /// Look a word up, fixing person, number, gender and case features on
    /// personal pronouns.
    pub fn create_word(&self, text: &str, category: LexicalCategory) -> WordElement {
        let mut word = self.lexicon.lookup_word(text, category);
        if PRONOUNS.contains(&text) {
            set_pronoun_features(&mut word, text);
        }
        word
    }

    pub fn create_inflected_word(&self, input: impl Into<Input>, category: LexicalCategory) -> Option<Element> {
        match input.into() {
            Input::Text(text) => Some(InflectedWord::from_word(self.create_word(&text, category)).into()),
            Input::Element(Element::Word(word)) => Some(InflectedWord::from_word(word).into()),
            Input::Element(other) => Some(other),
            Input::Empty => None,
        }
    }

    pub fn create_string(&self, text: impl Into<String>) -> Element {
        Element::canned(text)
    }

    pub fn string_is_word(&self, text: &str, category: LexicalCategory) -> bool {
        self.lexicon.has_word(text, category)
            || PRONOUNS.contains(&text)
            || text.chars().all(|c| c.is_alphanumeric() || c == '_')
    }

    /// Classify an input as an element. Inflected words fall back to their
    /// base word; canned text that reads as a word is looked up.
    pub fn create_element(&self, input: impl Into<Input>, category: LexicalCategory) -> Option<Element> {
        match input.into() {
            Input::Empty => None,
            Input::Element(Element::Inflected(word)) => match word.base_word {
                Some(base) => Some(Element::Word(*base)),
                None => Some(Element::Inflected(word)),
            },
            Input::Element(Element::Canned(text)) if self.string_is_word(&text.text, category) => {
                Some(self.create_word(&text.text, category).into())
            }
            Input::Element(other) => Some(other),
            Input::Text(text) if self.string_is_word(&text, category) => {
                Some(self.create_word(&text, category).into())
            }
            Input::Text(text) => Some(Element::canned(text)),
        }
    }

    /// A noun phrase. An input that already is a noun phrase is returned as is.
    pub fn create_noun_phrase(&self, specifier: impl Into<Input>, noun: impl Into<Input>) -> PhraseElement {
        let noun = noun.into();
        if let Input::Element(Element::Phrase(np)) = &noun {
            if np.category == PhraseCategory::NounPhrase {
                return np.clone();
            }
        }
        let mut phrase = PhraseElement::new(PhraseCategory::NounPhrase);
        phrase.set(Feature::Elided, false);
        if let Some(head) = self.create_element(noun, LexicalCategory::Noun) {
            phrase.set_head(head);
        }
        self.set_specifier(&mut phrase, specifier);
        phrase
    }

    pub fn set_specifier(&self, phrase: &mut PhraseElement, specifier: impl Into<Input>) {
        match specifier.into() {
            Input::Empty => {}
            Input::Element(element) => phrase.set_specifier(element),
            Input::Text(text) => {
                let word = self.create_word(&text, LexicalCategory::Determiner);
                phrase.set_specifier(word.into());
            }
        }
    }

    pub fn set_noun(&self, phrase: &mut PhraseElement, noun: impl Into<Input>) {
        if let Some(head) = self.create_element(noun, LexicalCategory::Noun) {
            phrase.set_head(head);
        }
    }

    pub fn create_verb_phrase(&self, verb: impl Into<Input>) -> PhraseElement {
        let mut phrase = PhraseElement::new(PhraseCategory::VerbPhrase);
        phrase.set(Feature::Elided, false);
        phrase.set(Feature::Perfect, false);
        phrase.set(Feature::Progressive, false);
        phrase.set(Feature::Passive, false);
        phrase.set(Feature::Negated, false);
        phrase.set(Feature::Tense, Tense::Present);
        phrase.set(Feature::Person, Person::Third);
        phrase.set(Feature::Number, NumberAgreement::Singular);
        phrase.set(Feature::Form, Form::Normal);
        phrase.set(Feature::RealiseAuxiliary, true);
        self.set_verb(&mut phrase, verb);
        phrase
    }

    /// Set the verb of a verb phrase or clause. Text with a space splits into
    /// verb and particle ("pick up").
    pub fn set_verb(&self, phrase: &mut PhraseElement, verb: impl Into<Input>) {
        if phrase.is_clause() {
            if let Some(Element::Phrase(vp)) = phrase.verb_phrase.as_deref_mut() {
                self.set_verb(vp, verb);
            }
            return;
        }
        let head = match verb.into() {
            Input::Text(text) => match text.split_once(' ') {
                Some((verb, particle)) => {
                    phrase.set(Feature::Particle, particle);
                    Some(self.create_word(verb, LexicalCategory::Verb).into())
                }
                None => Some(self.create_word(&text, LexicalCategory::Verb).into()),
            },
            other => self.create_element(other, LexicalCategory::Verb),
        };
        phrase.head = head.map(Box::new);
    }

    pub fn create_clause(
        &self,
        subject: impl Into<Input>,
        verb: impl Into<Input>,
        object: impl Into<Input>,
    ) -> PhraseElement {
        let mut clause = PhraseElement::new(PhraseCategory::Clause);
        clause.set_verb_phrase(self.create_verb_phrase(()).into());
        clause.set(Feature::Elided, false);
        clause.set(Feature::ClauseStatus, ClauseStatus::Matrix);
        clause.set(Feature::SuppressedComplementiser, false);
        clause.set(Feature::ExpletiveSubject, false);
        let complementiser = self.create_word("that", LexicalCategory::Complementiser);
        clause.complementiser = Some(Box::new(complementiser.into()));

        match verb.into() {
            Input::Element(Element::Phrase(vp)) => clause.set_verb_phrase(vp.into()),
            Input::Empty => {}
            other => self.set_verb(&mut clause, other),
        }
        self.set_subject(&mut clause, subject);
        self.set_object(&mut clause, object);
        clause
    }

    /// Phrases and coordinations become the subject as they are; anything
    /// else is wrapped in a noun phrase.
    pub fn set_subject(&self, clause: &mut PhraseElement, subject: impl Into<Input>) {
        if let Some(subject) = self.phrase_or_noun_phrase(subject.into()) {
            clause.set_subject(subject);
        }
    }

    pub fn add_subject(&self, clause: &mut PhraseElement, subject: impl Into<Input>) {
        if let Some(subject) = self.phrase_or_noun_phrase(subject.into()) {
            clause.add_subject(subject);
        }
    }

    /// Prepositional phrases always wrap the object in a noun phrase.
    pub fn set_object(&self, phrase: &mut PhraseElement, object: impl Into<Input>) {
        let object = object.into();
        let object = if phrase.category == PhraseCategory::PrepositionalPhrase {
            match object {
                Input::Empty => None,
                other => Some(self.create_noun_phrase((), other).into()),
            }
        } else {
            self.phrase_or_noun_phrase(object)
        };
        if let Some(object) = object {
            phrase.set_object(object);
        }
    }

    pub fn set_indirect_object(&self, phrase: &mut PhraseElement, object: impl Into<Input>) {
        if let Some(object) = self.phrase_or_noun_phrase(object.into()) {
            phrase.set_indirect_object(object);
        }
    }

    fn phrase_or_noun_phrase(&self, input: Input) -> Option<Element> {
        match input {
            Input::Empty => None,
            Input::Element(element @ (Element::Phrase(_) | Element::Coordinated(_))) => Some(element),
            other => Some(self.create_noun_phrase((), other).into()),
        }
    }

    /// Text complements are kept as canned text.
    pub fn add_complement(&self, phrase: &mut PhraseElement, complement: impl Into<Input>) {
        match complement.into() {
            Input::Empty => {}
            Input::Text(text) => phrase.add_complement(Element::canned(text)),
            Input::Element(element) => phrase.add_complement(element),
        }
    }

    pub fn set_complement(&self, phrase: &mut PhraseElement, complement: impl Into<Input>) {
        match complement.into() {
            Input::Empty => {}
            Input::Text(text) => {
                phrase.clear_complements();
                phrase.add_complement(Element::canned(text));
            }
            Input::Element(element) => phrase.set_complement(element),
        }
    }

    pub fn add_pre_modifier(&self, phrase: &mut PhraseElement, modifier: impl Into<Input>) {
        if let Some(modifier) = canned_or_element(modifier.into()) {
            phrase.add_pre_modifier(modifier);
        }
    }

    pub fn add_post_modifier(&self, phrase: &mut PhraseElement, modifier: impl Into<Input>) {
        if let Some(modifier) = canned_or_element(modifier.into()) {
            phrase.add_post_modifier(modifier);
        }
    }

    pub fn add_front_modifier(&self, phrase: &mut PhraseElement, modifier: impl Into<Input>) {
        if let Some(modifier) = canned_or_element(modifier.into()) {
            phrase.add_front_modifier(modifier);
        }
    }

    pub fn set_cue_phrase(&self, clause: &mut PhraseElement, cue: impl Into<Input>) {
        if let Some(cue) = canned_or_element(cue.into()) {
            clause.set_cue_phrase(cue);
        }
    }

    /// Place a modifier by what it is: adjectives before nouns, adverbs
    /// before verbs (or at the front of a clause when they modify the whole
    /// sentence), everything else after the head.
    pub fn add_modifier(&self, phrase: &mut PhraseElement, modifier: impl Into<Input>) {
        let element = match modifier.into() {
            Input::Empty => return,
            Input::Element(element) => element,
            Input::Text(text) if !text.is_empty() && !text.contains(' ') => {
                self.create_word(&text, LexicalCategory::Any).into()
            }
            Input::Text(text) => {
                match phrase.category {
                    PhraseCategory::Clause | PhraseCategory::NounPhrase | PhraseCategory::VerbPhrase => {
                        phrase.add_post_modifier(Element::canned(text))
                    }
                    _ => phrase.add_pre_modifier(Element::canned(text)),
                }
                return;
            }
        };

        let word = match &element {
            Element::Word(word) => Some(word),
            Element::Inflected(word) => word.base_word.as_deref(),
            _ => None,
        };
        let word_category = word.map(|w| w.category);
        let sentence_modifier = word.is_some_and(|w| w.flag(Feature::SentenceModifier));
        let placed = match &element {
            Element::Inflected(inflected) => inflected.base_word.as_deref().cloned().map(Element::Word),
            _ => None,
        }
        .unwrap_or_else(|| element.clone());

        match phrase.category {
            PhraseCategory::NounPhrase => {
                if element.is_phrase(PhraseCategory::AdjectivePhrase) {
                    phrase.add_pre_modifier(element);
                } else if word_category == Some(LexicalCategory::Adjective) {
                    phrase.add_pre_modifier(placed);
                } else {
                    phrase.add_post_modifier(element);
                }
            }
            PhraseCategory::Clause => {
                if element.is_phrase(PhraseCategory::AdverbPhrase) {
                    phrase.add_pre_modifier(element);
                } else if word_category == Some(LexicalCategory::Adverb) {
                    if sentence_modifier {
                        phrase.add_front_modifier(placed);
                    } else {
                        phrase.add_pre_modifier(placed);
                    }
                } else {
                    phrase.add_post_modifier(element);
                }
            }
            PhraseCategory::VerbPhrase => {
                if word_category == Some(LexicalCategory::Adverb) {
                    phrase.add_pre_modifier(placed);
                } else {
                    phrase.add_post_modifier(element);
                }
            }
            _ => phrase.add_pre_modifier(element),
        }
    }

    pub fn create_adjective_phrase(&self, adjective: impl Into<Input>) -> PhraseElement {
        self.headed_phrase(PhraseCategory::AdjectivePhrase, adjective, LexicalCategory::Adjective)
    }

    pub fn create_adverb_phrase(&self, adverb: impl Into<Input>) -> PhraseElement {
        self.headed_phrase(PhraseCategory::AdverbPhrase, adverb, LexicalCategory::Adverb)
    }

    pub fn create_preposition_phrase(
        &self,
        preposition: impl Into<Input>,
        complement: impl Into<Input>,
    ) -> PhraseElement {
        let mut phrase = self.headed_phrase(
            PhraseCategory::PrepositionalPhrase,
            preposition,
            LexicalCategory::Preposition,
        );
        if let Some(complement) = self.create_element(complement, LexicalCategory::Any) {
            phrase.add_complement(complement);
        }
        phrase
    }

    fn headed_phrase(
        &self,
        category: PhraseCategory,
        head: impl Into<Input>,
        head_category: LexicalCategory,
    ) -> PhraseElement {
        let mut phrase = PhraseElement::new(category);
        phrase.set(Feature::Elided, false);
        if let Some(head) = self.create_element(head, head_category) {
            phrase.set_head(head);
        }
        phrase
    }

    pub fn create_coordinated_phrase(
        &self,
        first: impl Into<Input>,
        second: impl Into<Input>,
    ) -> CoordinatedPhrase {
        let mut phrase = CoordinatedPhrase::new(Vec::new());
        self.add_coordinate(&mut phrase, first);
        self.add_coordinate(&mut phrase, second);
        phrase
    }

    /// Text coordinates are canned and never take a complementiser.
    pub fn add_coordinate(&self, phrase: &mut CoordinatedPhrase, coordinate: impl Into<Input>) {
        match coordinate.into() {
            Input::Empty => {}
            Input::Text(text) => {
                let mut element = StringElement::new(text);
                element.set(Feature::SuppressedComplementiser, true);
                phrase.add_coordinate(element.into());
            }
            Input::Element(element) => phrase.add_coordinate(element),
        }
    }

    pub fn create_document(&self, title: Option<&str>, components: Vec<Element>) -> DocumentElement {
        document(DocumentCategory::Document, title, components)
    }

    pub fn create_section(&self, title: Option<&str>, components: Vec<Element>) -> DocumentElement {
        document(DocumentCategory::Section, title, components)
    }

    pub fn create_paragraph(&self, components: Vec<Element>) -> DocumentElement {
        document(DocumentCategory::Paragraph, None, components)
    }

    pub fn create_list(&self, components: Vec<Element>) -> DocumentElement {
        document(DocumentCategory::List, None, components)
    }

    pub fn create_enumerated_list(&self, components: Vec<Element>) -> DocumentElement {
        document(DocumentCategory::EnumeratedList, None, components)
    }

    pub fn create_list_item(&self, component: impl Into<Input>) -> DocumentElement {
        let mut item = DocumentElement::new(DocumentCategory::ListItem, None);
        if let Input::Element(element) = component.into() {
            item.add_component(element);
        }
        item
    }

    /// A sentence holding canned text or an element.
    pub fn create_sentence(&self, content: impl Into<Input>) -> DocumentElement {
        let mut sentence = DocumentElement::new(DocumentCategory::Sentence, None);
        match content.into() {
            Input::Empty => {}
            Input::Text(text) => sentence.add_component(Element::canned(text)),
            Input::Element(element) => sentence.add_component(element),
        }
        sentence
    }

    pub fn create_sentence_from_clause(
        &self,
        subject: impl Into<Input>,
        verb: impl Into<Input>,
        complement: impl Into<Input>,
    ) -> DocumentElement {
        let clause = self.create_clause(subject, verb, complement);
        self.create_sentence(clause)
    }
}

fn canned_or_element(input: Input) -> Option<Element> {
    match input {
        Input::Empty => None,
        Input::Text(text) => Some(Element::canned(text)),
        Input::Element(element) => Some(element),
    }
}

fn document(category: DocumentCategory, title: Option<&str>, components: Vec<Element>) -> DocumentElement {
    let mut element = DocumentElement::new(category, title.map(str::to_string));
    element.add_components(components);
    element
}

fn set_pronoun_features(word: &mut WordElement, text: &str) {
    word.category = LexicalCategory::Pronoun;
    if FIRST_PERSON.contains(&text) {
        word.set(Feature::Person, Person::First);
    } else if SECOND_PERSON.contains(&text) {
        word.set(Feature::Person, Person::Second);
        let number = match text.to_lowercase().as_str() {
            "yourself" => NumberAgreement::Singular,
            "yourselves" => NumberAgreement::Plural,
            _ => NumberAgreement::Both,
        };
        word.set(Feature::Number, number);
    } else {
        word.set(Feature::Person, Person::Third);
    }
    word.set(Feature::Reflexive, REFLEXIVE.contains(&text));
    let gender = if MASCULINE.contains(&text) {
        Gender::Masculine
    } else if FEMININE.contains(&text) {
        Gender::Feminine
    } else {
        Gender::Neuter
    };
    word.set(Feature::Gender, gender);
    word.set(Feature::Possessive, POSSESSIVE.contains(&text));
    if PLURAL.contains(&text) && !SECOND_PERSON.contains(&text) {
        word.set(Feature::Number, NumberAgreement::Plural);
    } else if text != EXPLETIVE {
        word.set(Feature::Number, NumberAgreement::Singular);
    }
    if text == EXPLETIVE {
        word.set(Feature::NonMorph, true);
        word.set(Feature::ExpletiveSubject, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lexicon::MemoryLexicon;
    use crate::schema::features::DiscourseFunction;

    fn with_factory(check: impl FnOnce(&NlgFactory<'_>)) {
        let lexicon = MemoryLexicon::english().unwrap();
        let factory = NlgFactory::new(lexicon.as_ref());
        check(&factory);
    }

    #[test]
    fn pronouns_get_fixed_features() {
        with_factory(|f| {
            let we = f.create_word("we", LexicalCategory::Any);
            assert_eq!(we.category, LexicalCategory::Pronoun);
            assert_eq!(we.person(), Some(Person::First));
            assert_eq!(we.number(), Some(NumberAgreement::Plural));

            let you = f.create_word("you", LexicalCategory::Any);
            assert_eq!(you.person(), Some(Person::Second));
            assert_eq!(you.number(), Some(NumberAgreement::Singular));

            let yourselves = f.create_word("yourselves", LexicalCategory::Any);
            assert!(yourselves.flag(Feature::Reflexive));
            assert_eq!(yourselves.number(), Some(NumberAgreement::Singular));

            let her = f.create_word("hers", LexicalCategory::Any);
            assert_eq!(her.gender(), Some(Gender::Feminine));
            assert!(her.flag(Feature::Possessive));

            let there = f.create_word("there", LexicalCategory::Any);
            assert!(there.flag(Feature::ExpletiveSubject));
            assert!(there.flag(Feature::NonMorph));
            assert_eq!(there.number(), None);
        });
    }

    #[test]
    fn text_with_spaces_is_canned() {
        with_factory(|f| {
            assert!(f.string_is_word("elephant", LexicalCategory::Noun));
            assert!(f.string_is_word("zorblax", LexicalCategory::Noun));
            assert!(!f.string_is_word("the man", LexicalCategory::Noun));
            let element = f.create_element("the man", LexicalCategory::Noun).unwrap();
            assert!(matches!(element, Element::Canned(_)));
        });
    }

    #[test]
    fn clause_defaults() {
        with_factory(|f| {
            let clause = f.create_clause("the woman", "kiss", "the man");
            assert_eq!(clause.clause_status(), Some(ClauseStatus::Matrix));
            assert_eq!(clause.tense(), Some(Tense::Present));
            assert!(!clause.flag(Feature::SuppressedComplementiser));
            assert_eq!(clause.subjects.len(), 1);
            assert!(clause.subjects[0].is_phrase(PhraseCategory::NounPhrase));
            assert_eq!(clause.object().unwrap().function(), Some(DiscourseFunction::Object));
            let verb = clause.verb_element().unwrap();
            assert!(verb.is_phrase(PhraseCategory::VerbPhrase));
        });
    }

    #[test]
    fn particle_verbs_split() {
        with_factory(|f| {
            let vp = f.create_verb_phrase("pick up");
            assert_eq!(vp.text(Feature::Particle), Some("up"));
            assert_eq!(vp.head.as_deref().and_then(Element::base_form), Some("pick"));
        });
    }

    #[test]
    fn modifiers_are_placed_by_category() {
        with_factory(|f| {
            let mut np = f.create_noun_phrase("the", "dog");
            f.add_modifier(&mut np, "black");
            f.add_modifier(&mut np, "in the garden");
            assert_eq!(np.premodifiers.len(), 1);
            assert_eq!(np.postmodifiers.len(), 1);

            let mut clause = f.create_clause("I", "go", ());
            f.add_modifier(&mut clause, "however");
            f.add_modifier(&mut clause, "quickly");
            assert_eq!(clause.front_modifiers.len(), 1);
            let Some(Element::Phrase(vp)) = clause.verb_phrase.as_deref() else {
                panic!("clause without verb phrase");
            };
            assert_eq!(vp.premodifiers.len(), 1);
        });
    }

    #[test]
    fn sentences_wrap_text_and_clauses() {
        with_factory(|f| {
            let canned = f.create_sentence("hello there");
            assert!(matches!(canned.components[0], Element::Canned(_)));
            let clause = f.create_sentence_from_clause("you", "be", "happy");
            assert!(clause.components[0].is_phrase(PhraseCategory::Clause));
        });
    }

    #[test]
    fn text_coordinates_suppress_complementiser() {
        with_factory(|f| {
            let coord = f.create_coordinated_phrase("the dog", "the cat");
            assert_eq!(coord.coordinates.len(), 2);
            assert!(coord.coordinates.iter().all(|c| c.flag(Feature::SuppressedComplementiser)));
        });
    }
}

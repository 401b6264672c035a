//! Feature keys, feature values and the typed map elements carry them in.
//!
//! Keys are a closed enum and values a small closed set of variants. A
//! feature that is "unset" is simply absent from the map.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Grammatical role a child plays relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiscourseFunction {
    Auxiliary,
    Complement,
    Conjunction,
    CuePhrase,
    FrontModifier,
    Head,
    IndirectObject,
    Object,
    PreModifier,
    PostModifier,
    Specifier,
    Subject,
    VerbPhrase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Form {
    BareInfinitive,
    Gerund,
    Imperative,
    Infinitive,
    Normal,
    PastParticiple,
    PresentParticiple,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tense {
    Past,
    Present,
    Future,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumberAgreement {
    Both,
    Plural,
    Singular,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Person {
    First,
    Second,
    Third,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Masculine,
    Feminine,
    Neuter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClauseStatus {
    Matrix,
    Subordinate,
}

/// Inflection pattern declared for a lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Inflection {
    GrecoLatinRegular,
    Irregular,
    Regular,
    RegularDouble,
    Uncount,
    Invariant,
}

impl Inflection {
    /// Map a bare lexicon tag onto an inflection pattern.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "reg" => Some(Self::Regular),
            "irreg" => Some(Self::Irregular),
            "regd" => Some(Self::RegularDouble),
            "glreg" => Some(Self::GrecoLatinRegular),
            "uncount" | "noncount" | "groupuncount" => Some(Self::Uncount),
            "inv" => Some(Self::Invariant),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InterrogativeType {
    How,
    HowPredicate,
    WhatObject,
    WhatSubject,
    Where,
    WhoIndirectObject,
    WhoObject,
    WhoSubject,
    Why,
    YesNo,
    HowMany,
}

impl InterrogativeType {
    /// The question word this type opens with, if any.
    pub fn question_word(&self) -> Option<&'static str> {
        match self {
            Self::How | Self::HowPredicate => Some("how"),
            Self::WhatObject | Self::WhatSubject => Some("what"),
            Self::Where => Some("where"),
            Self::WhoIndirectObject | Self::WhoObject | Self::WhoSubject => Some("who"),
            Self::Why => Some("why"),
            Self::HowMany => Some("how many"),
            Self::YesNo => None,
        }
    }

    /// True for questions that ask for the direct object.
    pub fn is_object(kind: Option<Self>) -> bool {
        matches!(kind, Some(Self::WhoObject) | Some(Self::WhatObject))
    }

    /// True for questions that ask for the indirect object.
    pub fn is_indirect_object(kind: Option<Self>) -> bool {
        matches!(kind, Some(Self::WhoIndirectObject))
    }

    pub fn is_subject(kind: Option<Self>) -> bool {
        matches!(kind, Some(Self::WhoSubject) | Some(Self::WhatSubject))
    }
}

/// Every feature key an element may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feature {
    // grammatical
    AdjectiveOrdering,
    AggregateAuxiliary,
    Appositive,
    ConjunctionType,
    Elided,
    Form,
    InterrogativeType,
    IsComparative,
    IsSuperlative,
    Modal,
    Negated,
    Number,
    Particle,
    Passive,
    Perfect,
    Person,
    Possessive,
    Pronominal,
    Progressive,
    RaiseSpecifier,
    SuppressGenitiveInGerund,
    SuppressedComplementiser,
    Tense,
    // internal
    Acronym,
    ClauseStatus,
    ComplementAgreement,
    DiscourseFunction,
    IgnoreModal,
    Interrogative,
    NonMorph,
    Raised,
    RealiseAuxiliary,
    // lexical
    Classifying,
    Colour,
    Comparative,
    DefaultInflection,
    DefaultSpelling,
    Ditransitive,
    ExpletiveSubject,
    Gender,
    Intensifier,
    Intransitive,
    Past,
    PastParticiple,
    Plural,
    Predicative,
    Present3s,
    PresentParticiple,
    Proper,
    Qualitative,
    Reflexive,
    SentenceModifier,
    Superlative,
    Transitive,
    VerbModifier,
}

impl Feature {
    /// Map a lexicon tag name onto a lexical feature key.
    pub fn from_lexicon_tag(tag: &str) -> Option<Self> {
        let feature = match tag {
            "classifying" => Self::Classifying,
            "colour" | "color" => Self::Colour,
            "comparative" => Self::Comparative,
            "default_infl" => Self::DefaultInflection,
            "default_spell" => Self::DefaultSpelling,
            "ditransitive" => Self::Ditransitive,
            "expletive_subject" => Self::ExpletiveSubject,
            "gender" => Self::Gender,
            "intensifier" => Self::Intensifier,
            "intransitive" => Self::Intransitive,
            "past" => Self::Past,
            "pastParticiple" | "past_participle" => Self::PastParticiple,
            "plural" => Self::Plural,
            "predicative" => Self::Predicative,
            "present3s" => Self::Present3s,
            "presentParticiple" | "present_participle" => Self::PresentParticiple,
            "proper" => Self::Proper,
            "qualitative" => Self::Qualitative,
            "reflexive" => Self::Reflexive,
            "sentence_modifier" => Self::SentenceModifier,
            "superlative" => Self::Superlative,
            "transitive" => Self::Transitive,
            "verb_modifier" => Self::VerbModifier,
            _ => return None,
        };
        Some(feature)
    }

    /// Features a clause forwards to its verb phrase.
    pub fn is_verb_phrase_feature(&self) -> bool {
        matches!(
            self,
            Self::Modal
                | Self::Tense
                | Self::Negated
                | Self::Number
                | Self::Passive
                | Self::Perfect
                | Self::Particle
                | Self::Person
                | Self::Progressive
                | Self::RealiseAuxiliary
                | Self::Form
                | Self::InterrogativeType
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FeatureValue {
    Bool(bool),
    Text(String),
    Number(NumberAgreement),
    Person(Person),
    Gender(Gender),
    Tense(Tense),
    Form(Form),
    Interrogative(InterrogativeType),
    Function(DiscourseFunction),
    ClauseStatus(ClauseStatus),
    Inflection(Inflection),
}

impl FeatureValue {
    pub fn as_bool(&self) -> bool {
        match self {
            FeatureValue::Bool(b) => *b,
            FeatureValue::Text(t) => t.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FeatureValue::Text(t) => Some(t.as_str()),
            _ => None,
        }
    }
}

/// Extraction of a typed value out of a [`FeatureValue`].
pub trait FeatureKind: Sized {
    fn from_value(value: &FeatureValue) -> Option<Self>;
}

macro_rules! feature_kind {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for FeatureValue {
            fn from(v: $ty) -> Self {
                FeatureValue::$variant(v)
            }
        }

        impl FeatureKind for $ty {
            fn from_value(value: &FeatureValue) -> Option<Self> {
                match value {
                    FeatureValue::$variant(v) => Some(*v),
                    _ => None,
                }
            }
        }
    };
}

feature_kind!(bool, Bool);
feature_kind!(NumberAgreement, Number);
feature_kind!(Person, Person);
feature_kind!(Gender, Gender);
feature_kind!(Tense, Tense);
feature_kind!(Form, Form);
feature_kind!(InterrogativeType, Interrogative);
feature_kind!(DiscourseFunction, Function);
feature_kind!(ClauseStatus, ClauseStatus);
feature_kind!(Inflection, Inflection);

impl From<String> for FeatureValue {
    fn from(v: String) -> Self {
        FeatureValue::Text(v)
    }
}

impl From<&str> for FeatureValue {
    fn from(v: &str) -> Self {
        FeatureValue::Text(v.to_string())
    }
}

/// Feature storage for one element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureMap {
    values: FxHashMap<Feature, FeatureValue>,
}

impl FeatureMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: Feature) -> Option<&FeatureValue> {
        self.values.get(&key)
    }

    pub fn get_as<T: FeatureKind>(&self, key: Feature) -> Option<T> {
        self.values.get(&key).and_then(T::from_value)
    }

    pub fn contains(&self, key: Feature) -> bool {
        self.values.contains_key(&key)
    }

    pub fn set(&mut self, key: Feature, value: impl Into<FeatureValue>) {
        self.values.insert(key, value.into());
    }

    /// Set or clear a feature: `None` removes the key.
    pub fn set_opt(&mut self, key: Feature, value: Option<FeatureValue>) {
        match value {
            Some(v) => {
                self.values.insert(key, v);
            }
            None => {
                self.values.remove(&key);
            }
        }
    }

    pub fn remove(&mut self, key: Feature) -> Option<FeatureValue> {
        self.values.remove(&key)
    }

    /// Boolean reading of a feature; absent means false.
    pub fn flag(&self, key: Feature) -> bool {
        self.values.get(&key).is_some_and(FeatureValue::as_bool)
    }

    pub fn text(&self, key: Feature) -> Option<&str> {
        self.values.get(&key).and_then(FeatureValue::as_text)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Feature, &FeatureValue)> {
        self.values.iter()
    }

    /// Copy every feature of `other` into this map, overwriting existing keys.
    pub fn extend_from(&mut self, other: &FeatureMap) {
        for (k, v) in other.iter() {
            self.values.insert(*k, v.clone());
        }
    }
}

//! Surface realiser: English text from phrase specifications.
//!
//! Callers build a tree of clauses, phrases and words with [`NlgFactory`],
//! set grammatical features on it (tense, number, passive, questions, ...)
//! and hand it to a [`Realiser`]. The realiser orders the words, inflects
//! them, punctuates the result and lays out document structure.

pub mod core;
pub mod schema;

pub use crate::core::factory::NlgFactory;
pub use crate::core::lexicon::{Lexicon, LexiconError, MemoryLexicon};
pub use crate::core::pipeline::{ConfigError, RealiseError, Realised, Realiser, RealiserBuilder, RealiserConfig};
pub use crate::schema::element::{Element, HasFeatures};
pub use crate::schema::features::{Feature, InterrogativeType, NumberAgreement, Person, Tense};

pub mod factory;
pub mod formatter;
pub mod lexicon;
pub mod morphology;
pub mod orthography;
pub mod pipeline;
pub mod syntax;

pub mod category;
pub mod document;
pub mod element;
pub mod features;
pub mod phrase;

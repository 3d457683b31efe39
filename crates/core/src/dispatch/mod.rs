pub mod open_source;
pub mod source_classifier;

pub use open_source::{open, open_with};
pub use source_classifier::classify;

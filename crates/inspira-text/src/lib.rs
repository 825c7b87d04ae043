//! inspira-text
//!
//! Text side of the recommender: the feature extractor that flattens an item
//! into a document, and the analyzer that turns documents into terms.

pub mod analyzer;
pub mod features;

pub use analyzer::Analyzer;
pub use features::{extract, Document};

//! inspira-index
//!
//! TF-IDF vector space over a catalog snapshot and cosine-similarity ranking
//! against the averaged profile of a set of seed items.

pub mod index;
pub mod space;
pub mod vectorizer;

pub use index::SimilarityIndex;
pub use space::VectorSpace;
pub use vectorizer::{FittedModel, SparseVector, TfidfVectorizer};

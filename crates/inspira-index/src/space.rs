//! One immutable build generation: vocabulary, per-item vectors and the
//! ranking that runs against them.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use inspira_core::types::{ItemId, RecommendationScore};
use inspira_text::Document;

use crate::vectorizer::{FittedModel, SparseVector};

#[derive(Debug, Clone, Default)]
pub struct VectorSpace {
    vocabulary: Vec<String>,
    idf: Vec<f64>,
    ids: Vec<ItemId>,
    rows: HashMap<ItemId, usize>,
    documents: Vec<Document>,
    vectors: Vec<SparseVector>,
}

impl VectorSpace {
    /// The space of an empty or degenerate corpus. Every query returns nothing.
    pub fn empty() -> Self { Self::default() }

    /// `ids`, `documents` and the model's vectors share one row order.
    pub(crate) fn from_model(ids: Vec<ItemId>, documents: Vec<Document>, model: FittedModel) -> Self {
        let rows = ids.iter().enumerate().map(|(row, id)| (id.clone(), row)).collect();
        Self { vocabulary: model.vocabulary, idf: model.idf, ids, rows, documents, vectors: model.vectors }
    }

    pub fn is_empty(&self) -> bool { self.vectors.is_empty() }

    /// Number of item vectors.
    pub fn len(&self) -> usize { self.vectors.len() }

    pub fn vocabulary(&self) -> &[String] { &self.vocabulary }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.term_column(term).map(|column| self.idf[column])
    }

    pub fn term_column(&self, term: &str) -> Option<usize> {
        self.vocabulary.binary_search_by(|t| t.as_str().cmp(term)).ok()
    }

    /// Item ids in build order.
    pub fn ids(&self) -> &[ItemId] { &self.ids }

    pub fn contains(&self, id: &str) -> bool { self.rows.contains_key(id) }

    pub fn vector(&self, id: &str) -> Option<&SparseVector> {
        self.rows.get(id).map(|&row| &self.vectors[row])
    }

    pub fn document(&self, id: &str) -> Option<&Document> {
        self.rows.get(id).map(|&row| &self.documents[row])
    }

    /// Rank every non-seed item by cosine similarity to the mean of the
    /// known seeds' unit vectors. Ties keep build order.
    pub fn recommend<S: AsRef<str>>(&self, query_item_ids: &[S], limit: usize) -> Vec<RecommendationScore> {
        if self.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut seeds: HashSet<&str> = HashSet::new();
        let mut seed_rows = Vec::new();
        for id in query_item_ids {
            let id = id.as_ref();
            if let Some(&row) = self.rows.get(id) {
                if seeds.insert(id) {
                    seed_rows.push(row);
                }
            }
        }
        if seed_rows.is_empty() {
            debug!(requested = query_item_ids.len(), "no known seed items");
            return Vec::new();
        }

        // Long seed documents must not outweigh short ones.
        let unit_seeds: Vec<SparseVector> = seed_rows.iter().map(|&row| self.vectors[row].normalized()).collect();
        let profile = SparseVector::mean(&unit_seeds);

        let mut scored: Vec<RecommendationScore> = self
            .ids
            .iter()
            .zip(&self.vectors)
            .filter(|(id, _)| !seeds.contains(id.as_str()))
            .map(|(id, vector)| RecommendationScore { item_id: id.clone(), score: profile.cosine(vector) as f32 })
            .collect();
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(limit);

        debug!(seeds = seed_rows.len(), returned = scored.len(), "ranked corpus");
        scored
    }
}

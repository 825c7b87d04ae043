//! TF-IDF vectorization over a whole corpus.
//!
//! Weights are `tf * idf` with raw term counts and the smoothed
//! `idf = ln((1 + n) / (1 + df)) + 1`. Every term that occurs in at least one
//! document is kept. Vectors are left unnormalized.

use std::collections::{BTreeMap, HashMap};

use inspira_core::config::EngineSettings;
use inspira_text::Analyzer;

/// Sparse vector with entries sorted by column and no explicit zeros.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Columns must be unique.
    pub fn from_entries(mut entries: Vec<(usize, f64)>) -> Self {
        entries.retain(|&(_, weight)| weight != 0.0);
        entries.sort_by_key(|&(column, _)| column);
        Self { entries }
    }

    pub fn entries(&self) -> &[(usize, f64)] { &self.entries }

    pub fn nnz(&self) -> usize { self.entries.len() }

    pub fn get(&self, column: usize) -> f64 {
        self.entries
            .binary_search_by_key(&column, |&(c, _)| c)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0.0)
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Unit-length copy. The zero vector stays zero.
    pub fn normalized(&self) -> SparseVector {
        let norm = self.norm();
        if norm == 0.0 {
            return self.clone();
        }
        Self { entries: self.entries.iter().map(|&(c, w)| (c, w / norm)).collect() }
    }

    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (ca, wa) = self.entries[i];
            let (cb, wb) = other.entries[j];
            match ca.cmp(&cb) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    /// Cosine similarity; 0 when either side has zero norm. Weights are
    /// non-negative so the result lies in `[0, 1]`.
    pub fn cosine(&self, other: &SparseVector) -> f64 {
        let denom = self.norm() * other.norm();
        if denom == 0.0 {
            return 0.0;
        }
        (self.dot(other) / denom).clamp(0.0, 1.0)
    }

    /// Component-wise arithmetic mean. Empty input gives the zero vector.
    pub fn mean<'a, I>(vectors: I) -> SparseVector
    where
        I: IntoIterator<Item = &'a SparseVector>,
    {
        let mut sums: BTreeMap<usize, f64> = BTreeMap::new();
        let mut count = 0usize;
        for vector in vectors {
            count += 1;
            for &(column, weight) in &vector.entries {
                *sums.entry(column).or_insert(0.0) += weight;
            }
        }
        if count == 0 {
            return SparseVector::default();
        }
        let n = count as f64;
        Self::from_entries(sums.into_iter().map(|(c, w)| (c, w / n)).collect())
    }
}

/// Result of fitting a corpus: sorted vocabulary, per-term idf and one
/// weighted vector per document, in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedModel {
    pub vocabulary: Vec<String>,
    pub idf: Vec<f64>,
    pub vectors: Vec<SparseVector>,
}

#[derive(Clone, Default)]
pub struct TfidfVectorizer {
    analyzer: Analyzer,
}

impl TfidfVectorizer {
    pub fn new(analyzer: Analyzer) -> Self { Self { analyzer } }

    pub fn from_settings(settings: &EngineSettings) -> Self { Self::new(Analyzer::from_settings(settings)) }

    pub fn analyzer(&self) -> &Analyzer { &self.analyzer }

    /// Learn the vocabulary and idf of `documents` and weight each of them.
    /// Returns `None` when the corpus yields no terms at all.
    pub fn fit_transform<S: AsRef<str>>(&self, documents: &[S]) -> Option<FittedModel> {
        let term_counts: Vec<HashMap<String, usize>> = documents
            .iter()
            .map(|doc| {
                let mut counts = HashMap::new();
                for term in self.analyzer.terms(doc.as_ref()) {
                    *counts.entry(term).or_insert(0) += 1;
                }
                counts
            })
            .collect();

        let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
        for counts in &term_counts {
            for term in counts.keys() {
                *doc_freq.entry(term.as_str()).or_insert(0) += 1;
            }
        }
        if doc_freq.is_empty() {
            return None;
        }

        let n_docs = documents.len();
        let vocabulary: Vec<String> = doc_freq.keys().map(|t| t.to_string()).collect();
        let idf: Vec<f64> = doc_freq.values().map(|&df| smoothed_idf(n_docs, df)).collect();

        let vectors = term_counts
            .iter()
            .map(|counts| {
                let entries = counts
                    .iter()
                    .filter_map(|(term, &count)| {
                        vocabulary.binary_search(term).ok().map(|column| (column, count as f64 * idf[column]))
                    })
                    .collect();
                SparseVector::from_entries(entries)
            })
            .collect();

        Some(FittedModel { vocabulary, idf, vectors })
    }
}

/// Strictly decreasing in `df`; a term present in every document keeps a
/// weight of 1.
pub fn smoothed_idf(n_docs: usize, df: usize) -> f64 {
    ((1.0 + n_docs as f64) / (1.0 + df as f64)).ln() + 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool { (a - b).abs() < 1e-9 }

    #[test]
    fn weights_follow_smoothed_idf() {
        let model = TfidfVectorizer::default()
            .fit_transform(&["apple banana", "apple cherry"])
            .expect("model");

        assert_eq!(model.vocabulary, vec!["apple", "apple banana", "apple cherry", "banana", "cherry"]);
        let col = |term: &str| model.vocabulary.iter().position(|t| t == term).expect("term");

        let first = &model.vectors[0];
        assert!(approx(first.get(col("apple")), 1.0));
        assert!(approx(first.get(col("banana")), (3.0f64 / 2.0).ln() + 1.0));
        assert!(approx(first.get(col("apple banana")), (3.0f64 / 2.0).ln() + 1.0));
        assert_eq!(first.get(col("cherry")), 0.0);
        assert_eq!(first.nnz(), 3);
    }

    #[test]
    fn repeated_terms_scale_with_count() {
        let model = TfidfVectorizer::default().fit_transform(&["movie movie", "track"]).expect("model");
        let col = model.vocabulary.iter().position(|t| t == "movie").expect("movie");
        assert!(approx(model.vectors[0].get(col), 2.0 * smoothed_idf(2, 1)));
    }

    #[test]
    fn idf_decreases_with_document_frequency() {
        let n = 10;
        for df in 1..n {
            assert!(smoothed_idf(n, df) > smoothed_idf(n, df + 1));
        }
        assert!(approx(smoothed_idf(n, n), 1.0));
    }

    #[test]
    fn stop_word_only_corpus_has_no_model() {
        let vectorizer = TfidfVectorizer::default();
        assert!(vectorizer.fit_transform(&["the and of", "a"]).is_none());
        assert!(vectorizer.fit_transform::<&str>(&[]).is_none());
    }

    #[test]
    fn cosine_of_disjoint_and_identical_vectors() {
        let a = SparseVector::from_entries(vec![(0, 1.0), (2, 2.0)]);
        let b = SparseVector::from_entries(vec![(1, 3.0)]);
        assert_eq!(a.cosine(&b), 0.0);
        assert!(approx(a.cosine(&a), 1.0));
        assert_eq!(a.cosine(&SparseVector::default()), 0.0);
    }

    #[test]
    fn mean_averages_component_wise() {
        let a = SparseVector::from_entries(vec![(0, 2.0), (1, 4.0)]);
        let b = SparseVector::from_entries(vec![(1, 2.0), (3, 6.0)]);
        let m = SparseVector::mean([&a, &b]);
        assert_eq!(m.entries(), &[(0, 1.0), (1, 3.0), (3, 3.0)]);
        assert_eq!(SparseVector::mean(std::iter::empty::<&SparseVector>()), SparseVector::default());
    }

    #[test]
    fn normalized_has_unit_norm_and_keeps_direction() {
        let v = SparseVector::from_entries(vec![(0, 3.0), (4, 4.0)]);
        let unit = v.normalized();
        assert!(approx(unit.norm(), 1.0));
        assert_eq!(unit.entries(), &[(0, 0.6), (4, 0.8)]);
        assert!(approx(unit.cosine(&v), 1.0));
        assert_eq!(SparseVector::default().normalized(), SparseVector::default());
    }
}

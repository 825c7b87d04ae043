use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;

use tracing::{debug, info};

use inspira_core::config::EngineSettings;
use inspira_core::traits::Recommender;
use inspira_core::types::{Item, ItemId, RecommendationScore};
use inspira_text::{extract, Document};

use crate::space::VectorSpace;
use crate::vectorizer::TfidfVectorizer;

/// Holds the current [`VectorSpace`] and answers similarity queries.
///
/// `build` fits a fresh space off to the side and publishes it with a single
/// pointer swap, so concurrent `recommend` calls see either the previous or
/// the new generation, never a mix.
pub struct SimilarityIndex {
    vectorizer: TfidfVectorizer,
    current: RwLock<Arc<VectorSpace>>,
}

impl SimilarityIndex {
    pub fn new(vectorizer: TfidfVectorizer) -> Self {
        Self { vectorizer, current: RwLock::new(Arc::new(VectorSpace::empty())) }
    }

    pub fn with_settings(settings: &EngineSettings) -> Self {
        Self::new(TfidfVectorizer::from_settings(settings))
    }

    /// Replace the vector space with one fitted over `items`.
    pub fn build(&self, items: &[Item]) {
        let start = Instant::now();
        let space = self.fit(items);
        info!(
            items = space.len(),
            terms = space.vocabulary().len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "rebuilt similarity index"
        );
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(space);
    }

    pub fn recommend<S: AsRef<str>>(&self, query_item_ids: &[S], limit: usize) -> Vec<RecommendationScore> {
        self.snapshot().recommend(query_item_ids, limit)
    }

    /// The currently published build generation.
    pub fn snapshot(&self) -> Arc<VectorSpace> {
        self.current.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn fit(&self, items: &[Item]) -> VectorSpace {
        // A repeated id takes the later item's content at the earlier position.
        let mut ids: Vec<ItemId> = Vec::with_capacity(items.len());
        let mut documents: Vec<Document> = Vec::with_capacity(items.len());
        let mut positions: HashMap<&str, usize> = HashMap::with_capacity(items.len());
        for item in items {
            let document = extract(item);
            match positions.get(item.id.as_str()) {
                Some(&pos) => documents[pos] = document,
                None => {
                    positions.insert(item.id.as_str(), ids.len());
                    ids.push(item.id.clone());
                    documents.push(document);
                }
            }
        }

        match self.vectorizer.fit_transform(documents.as_slice()) {
            Some(model) => VectorSpace::from_model(ids, documents, model),
            None => {
                debug!(items = ids.len(), "corpus has no terms; publishing empty space");
                VectorSpace::empty()
            }
        }
    }
}

impl Default for SimilarityIndex {
    fn default() -> Self { Self::new(TfidfVectorizer::default()) }
}

impl Recommender for SimilarityIndex {
    fn build(&self, items: &[Item]) { Self::build(self, items) }
    fn recommend(&self, query_item_ids: &[String], limit: usize) -> Vec<RecommendationScore> {
        Self::recommend(self, query_item_ids, limit)
    }
}

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use inspira_core::catalog::Catalog;
use inspira_core::config::{RecommendSettings, Settings};
use inspira_core::error::{Error, Result};
use inspira_core::traits::Recommender;
use inspira_core::types::{Item, RecommendationScore};
use inspira_index::SimilarityIndex;

/// Response of [`RecommendationService::recommend`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    pub recommendations: Vec<RecommendationScore>,
    pub user_id: String,
    pub limit: usize,
}

/// Owns the catalog and keeps a recommender in step with it.
///
/// Every mutation upserts and rebuilds under the catalog write lock, so once
/// it returns the recommender reflects the catalog.
pub struct RecommendationService<R> where R: Recommender {
    catalog: RwLock<Catalog>,
    recommender: R,
    limits: RecommendSettings,
}

impl RecommendationService<SimilarityIndex> {
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(SimilarityIndex::with_settings(&settings.engine), settings.recommend.clone())
    }
}

impl<R> RecommendationService<R> where R: Recommender {
    pub fn new(recommender: R, limits: RecommendSettings) -> Self {
        Self { catalog: RwLock::new(Catalog::new()), recommender, limits }
    }

    /// Seed the catalog with `items` and build once.
    pub fn with_items(recommender: R, limits: RecommendSettings, items: Vec<Item>) -> Self {
        let service = Self::new(recommender, limits);
        service.add_items(items);
        service
    }

    pub fn recommender(&self) -> &R { &self.recommender }

    pub fn limits(&self) -> &RecommendSettings { &self.limits }

    /// Insert or replace `item`, rebuild, and return the stored item.
    pub fn add_item(&self, item: Item) -> Item {
        let mut catalog = self.write();
        let stored = item.clone();
        if catalog.upsert(item).is_some() {
            debug!(id = %stored.id, "replaced existing item");
        }
        self.recommender.build(catalog.items());
        stored
    }

    /// Upsert every item with a single rebuild. Returns how many were given.
    pub fn add_items<I>(&self, items: I) -> usize where I: IntoIterator<Item = Item> {
        let mut catalog = self.write();
        let mut count = 0;
        for item in items {
            catalog.upsert(item);
            count += 1;
        }
        self.recommender.build(catalog.items());
        info!(added = count, total = catalog.len(), "catalog updated");
        count
    }

    /// All items in catalog order, or only those owned by `owner`.
    pub fn items(&self, owner: Option<&str>) -> Vec<Item> {
        let catalog = self.read();
        match owner {
            Some(owner) => catalog.owned_by(owner).cloned().collect(),
            None => catalog.items().to_vec(),
        }
    }

    pub fn item(&self, id: &str) -> Option<Item> { self.read().get(id).cloned() }

    /// Recommend items for `user_id`. With no `item_ids` the user's own items
    /// are the seeds. A limit of 0 yields an empty list.
    pub fn recommend(&self, user_id: &str, item_ids: &[String], limit: Option<usize>) -> Result<Recommendations> {
        let limit = limit.unwrap_or(self.limits.default_limit);
        if limit > self.limits.max_limit {
            return Err(Error::InvalidRequest(format!(
                "limit must be at most {}, got {limit}",
                self.limits.max_limit
            )));
        }

        let catalog = self.read();
        let seeds: Vec<String> = if item_ids.is_empty() {
            catalog.owned_by(user_id).map(|item| item.id.clone()).collect()
        } else {
            item_ids.to_vec()
        };
        if seeds.is_empty() {
            return Err(Error::NotFound(format!("No items found for user {user_id}")));
        }

        let recommendations = self.recommender.recommend(&seeds, limit);
        debug!(user = user_id, seeds = seeds.len(), returned = recommendations.len(), "recommend");
        Ok(Recommendations { recommendations, user_id: user_id.to_string(), limit })
    }

    /// Drop every item and rebuild over the empty catalog.
    pub fn reset(&self) {
        let mut catalog = self.write();
        catalog.clear();
        self.recommender.build(catalog.items());
        info!("catalog reset");
    }

    fn read(&self) -> RwLockReadGuard<'_, Catalog> { self.catalog.read().unwrap_or_else(PoisonError::into_inner) }

    fn write(&self) -> RwLockWriteGuard<'_, Catalog> { self.catalog.write().unwrap_or_else(PoisonError::into_inner) }
}

use crate::types::{Item, RecommendationScore};

/// A content-similarity engine that is rebuilt wholesale from a catalog
/// snapshot and then queried by seed item ids.
///
/// `recommend` on an engine that was never built, or whose last build was
/// empty, returns no results.
pub trait Recommender: Send + Sync {
    fn build(&self, items: &[Item]);
    fn recommend(&self, query_item_ids: &[String], limit: usize) -> Vec<RecommendationScore>;
}

//! Review persistence.
//!
//! The pipeline and the query handlers only see the [`ReviewStore`] trait.
//! [`SqliteReviewStore`] is the production implementation over a `sqlx` pool.

pub mod error;
pub mod schema;
pub mod sqlite;

pub use error::StoreError;
pub use sqlite::SqliteReviewStore;

use crate::model::{Analytics, NewReview, Review, Sentiment};
use async_trait::async_trait;
use serde::Serialize;

/// Filters and pagination for listing reviews.
///
/// Filters are optional and combine with AND.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewQuery {
    pub skip: u32,
    pub limit: u32,
    /// Exact star rating.
    pub rating: Option<u8>,
    /// Exact sentiment label.
    pub sentiment: Option<Sentiment>,
    /// Case-insensitive substring of the review text.
    pub search: Option<String>,
}

impl Default for ReviewQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: 100,
            rating: None,
            sentiment: None,
            search: None,
        }
    }
}

/// One page of matching reviews, newest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewPage {
    pub reviews: Vec<Review>,
    /// Number of matches before `skip`/`limit` were applied.
    pub total: u64,
}

/// Storage collaborator for reviews.
///
/// Reviews are append-only: there is no update or delete.
#[async_trait]
pub trait ReviewStore: Send + Sync + 'static {
    /// Persist a fully analysed review in its own transaction.
    ///
    /// Returns the stored record with its assigned `id` and `created_at`.
    async fn insert(&self, review: NewReview) -> Result<Review, StoreError>;

    async fn list(&self, query: &ReviewQuery) -> Result<ReviewPage, StoreError>;

    async fn analytics(&self) -> Result<Analytics, StoreError>;

    /// Cheap liveness check used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_query() {
        let query = ReviewQuery::default();
        assert_eq!(query.skip, 0);
        assert_eq!(query.limit, 100);
        assert!(query.rating.is_none());
        assert!(query.sentiment.is_none());
        assert!(query.search.is_none());
    }

    #[test]
    fn test_page_serializes_reviews_and_total() {
        let page = ReviewPage {
            reviews: vec![],
            total: 3,
        };
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["total"], 3);
        assert!(json["reviews"].as_array().unwrap().is_empty());
    }
}

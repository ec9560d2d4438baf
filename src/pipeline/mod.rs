//! Review ingestion pipeline.
//!
//! [`ReviewPipeline::submit`] validates a submission, runs the four analysis
//! stages in order (sentiment first, since the other stages are conditioned on
//! it), and persists the assembled record through the [`ReviewStore`].
//!
//! Only validation and storage failures reach the caller. Model failures are
//! absorbed by each stage's fallback, logged, and counted.

pub mod error;
pub mod validation;

pub use error::PipelineError;
pub use validation::{validate, ValidatedReview, ValidationError};

use crate::agent::TextGenerator;
use crate::analysis::{
    Outcome, RecommendationGenerator, ResponseGenerator, SentimentClassifier, Stage,
    SummaryGenerator,
};
use crate::logging::{generate_request_id, text_preview};
use crate::model::{NewReview, Review};
use crate::store::ReviewStore;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;

/// Orchestrates analysis and persistence of a single review.
pub struct ReviewPipeline {
    agent: Arc<dyn TextGenerator>,
    store: Arc<dyn ReviewStore>,
    classifier: SentimentClassifier,
    responder: ResponseGenerator,
    summarizer: SummaryGenerator,
    recommender: RecommendationGenerator,
    content_logging: bool,
}

impl ReviewPipeline {
    pub fn new(agent: Arc<dyn TextGenerator>, store: Arc<dyn ReviewStore>) -> Self {
        Self {
            classifier: SentimentClassifier::new(Arc::clone(&agent)),
            responder: ResponseGenerator::new(Arc::clone(&agent)),
            summarizer: SummaryGenerator::new(Arc::clone(&agent)),
            recommender: RecommendationGenerator::new(Arc::clone(&agent)),
            agent,
            store,
            content_logging: false,
        }
    }

    /// Include a truncated preview of the review text in debug logs.
    pub fn with_content_logging(mut self, enabled: bool) -> Self {
        self.content_logging = enabled;
        self
    }

    pub fn store(&self) -> &Arc<dyn ReviewStore> {
        &self.store
    }

    pub fn agent(&self) -> &Arc<dyn TextGenerator> {
        &self.agent
    }

    /// Validate, analyse and store a review under a fresh request ID.
    pub async fn submit(&self, rating: i64, review_text: &str) -> Result<Review, PipelineError> {
        self.submit_with_request_id(rating, review_text, &generate_request_id())
            .await
    }

    /// Same as [`submit`](Self::submit), tagging logs with the caller's request ID.
    pub async fn submit_with_request_id(
        &self,
        rating: i64,
        review_text: &str,
        request_id: &str,
    ) -> Result<Review, PipelineError> {
        let span = tracing::info_span!("submit_review", request_id = %request_id, rating);
        let result = self.run(rating, review_text).instrument(span).await;

        if let Err(e) = &result {
            crate::metrics::record_rejection(e.kind());
        }
        result
    }

    async fn run(&self, rating: i64, review_text: &str) -> Result<Review, PipelineError> {
        let ValidatedReview { rating, text } = validate(rating, review_text).map_err(|e| {
            tracing::info!(field = e.field(), error = %e, "Rejected review");
            e
        })?;

        if let Some(preview) = text_preview(text, self.content_logging) {
            tracing::debug!(preview = %preview, "Analysing review");
        }

        let sentiment = self
            .observe(Stage::Sentiment, self.classifier.classify(text, rating))
            .await;
        let ai_response = self
            .observe(Stage::Response, self.responder.generate(text, rating, sentiment))
            .await;
        let ai_summary = self
            .observe(Stage::Summary, self.summarizer.generate(text, rating))
            .await;
        let recommended_actions = self
            .observe(
                Stage::Recommendations,
                self.recommender.generate(text, rating, sentiment),
            )
            .await;

        let record = NewReview {
            rating,
            review_text: text.to_string(),
            sentiment,
            ai_response,
            ai_summary,
            recommended_actions,
        };

        match self.store.insert(record).await {
            Ok(review) => {
                crate::metrics::record_submission(review.sentiment);
                tracing::info!(
                    review_id = review.id,
                    sentiment = %review.sentiment,
                    "Review stored"
                );
                Ok(review)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to store review");
                Err(e.into())
            }
        }
    }

    /// Run one stage, recording its duration and logging any fallback.
    async fn observe<T>(&self, stage: Stage, run: impl Future<Output = Outcome<T>>) -> T {
        let start = Instant::now();
        let outcome = run.await;
        let elapsed = start.elapsed();

        crate::metrics::record_stage(stage, elapsed, outcome.is_fallback());

        match outcome {
            Outcome::Generated(value) => {
                tracing::debug!(
                    stage = %stage,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Stage generated"
                );
                value
            }
            Outcome::Fallback { value, reason } => {
                if self.agent.is_enabled() {
                    tracing::warn!(
                        stage = %stage,
                        reason = reason.kind(),
                        error = %reason,
                        "Stage fell back to static output"
                    );
                } else {
                    tracing::debug!(stage = %stage, "Generation disabled, using fallback");
                }
                value
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::mock::MockAgent;
    use crate::agent::DisabledAgent;
    use crate::analysis::{recommendations, response};
    use crate::model::Sentiment;
    use crate::store::{ReviewQuery, SqliteReviewStore};

    async fn pipeline_with(agent: Arc<dyn TextGenerator>) -> (ReviewPipeline, Arc<SqliteReviewStore>) {
        let store = Arc::new(SqliteReviewStore::in_memory().await.unwrap());
        let pipeline = ReviewPipeline::new(agent, store.clone());
        (pipeline, store)
    }

    #[tokio::test]
    async fn test_fallback_end_to_end() {
        let (pipeline, _store) = pipeline_with(Arc::new(MockAgent::failing())).await;

        let review = pipeline.submit(5, "Great service!").await.unwrap();

        assert_eq!(review.rating, 5);
        assert_eq!(review.sentiment, Sentiment::Positive);
        assert_eq!(review.ai_response, response::fallback(Sentiment::Positive));
        assert!(review
            .ai_summary
            .starts_with("Customer rated 5/5 stars: Great service!"));
        assert_eq!(
            review.recommended_actions,
            recommendations::fallback(Sentiment::Positive)
        );
    }

    #[tokio::test]
    async fn test_generated_outputs_are_stored() {
        let agent = Arc::new(MockAgent::replying("negative"));
        let (pipeline, store) = pipeline_with(agent.clone()).await;

        let review = pipeline.submit(1, "  Broken zipper  ").await.unwrap();

        assert_eq!(review.sentiment, Sentiment::Negative);
        assert_eq!(review.ai_response, "negative");
        assert_eq!(review.review_text, "Broken zipper");
        assert_eq!(agent.requests().len(), 4);

        let page = store.list(&ReviewQuery::default()).await.unwrap();
        assert_eq!(page.reviews, vec![review]);
    }

    #[tokio::test]
    async fn test_validation_failure_skips_model_and_store() {
        let agent = Arc::new(MockAgent::replying("positive"));
        let (pipeline, store) = pipeline_with(agent.clone()).await;

        for (rating, text) in [(0, "fine"), (6, "fine"), (3, ""), (3, "   ")] {
            let err = pipeline.submit(rating, text).await.unwrap_err();
            assert!(matches!(err, PipelineError::Validation(_)));
        }

        assert!(agent.requests().is_empty());
        assert_eq!(store.analytics().await.unwrap().total_reviews, 0);
    }

    #[tokio::test]
    async fn test_storage_failure_is_reported() {
        let (pipeline, store) = pipeline_with(Arc::new(MockAgent::failing())).await;
        store.close().await;

        let err = pipeline.submit(3, "Average").await.unwrap_err();
        assert!(matches!(err, PipelineError::Storage(_)));
        assert_eq!(err.kind(), "storage");
    }

    #[tokio::test]
    async fn test_disabled_agent_uses_fallbacks() {
        let agent = Arc::new(DisabledAgent::new("no key"));
        let (pipeline, _store) = pipeline_with(agent).await;

        let review = pipeline.submit(3, "It arrived.").await.unwrap();
        assert_eq!(review.sentiment, Sentiment::Neutral);
        assert_eq!(
            review.recommended_actions,
            recommendations::fallback(Sentiment::Neutral)
        );
    }

    #[tokio::test]
    async fn test_request_id_variant_stores_review() {
        let (pipeline, _store) = pipeline_with(Arc::new(MockAgent::failing())).await;
        let pipeline = pipeline.with_content_logging(true);

        let review = pipeline
            .submit_with_request_id(4, "Nice", "req-123")
            .await
            .unwrap();
        assert_eq!(review.sentiment, Sentiment::Positive);
    }
}

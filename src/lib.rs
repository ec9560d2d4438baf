//! Review Insight - customer review ingestion and analysis
//!
//! Reviews are validated, classified by sentiment, given a generated reply,
//! summary and recommended actions, then persisted to SQLite. Aggregate
//! analytics are computed from the stored reviews.
//!
//! Text generation goes through an OpenAI-compatible chat API. When that
//! service is unavailable, every analysis stage falls back to static output
//! so submissions are never lost to a model outage.

pub mod agent;
pub mod analysis;
pub mod api;
pub mod cli;
pub mod config;
pub mod logging;
pub mod metrics;
pub mod model;
pub mod pipeline;
pub mod store;

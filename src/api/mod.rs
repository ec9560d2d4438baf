//! # HTTP API
//!
//! JSON endpoints for submitting, listing and summarising reviews.
//!
//! ## Endpoints
//!
//! - `POST /api/reviews` - Analyse and store a review (201)
//! - `GET /api/reviews` - Paginated, filtered listing
//! - `GET /api/analytics` - Aggregate counts and average rating
//! - `GET /api/health` - Service health
//! - `GET /` - Service banner
//! - `GET /metrics` - Prometheus metrics
//!
//! ## Example
//!
//! ```no_run
//! use review_insight::agent::DisabledAgent;
//! use review_insight::api::{create_router, AppState};
//! use review_insight::config::AppConfig;
//! use review_insight::store::SqliteReviewStore;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Arc::new(AppConfig::default());
//! let store = Arc::new(SqliteReviewStore::in_memory().await?);
//! let agent = Arc::new(DisabledAgent::new("no API key"));
//!
//! let state = Arc::new(AppState::new(config, agent, store));
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All errors share one envelope:
//! ```json
//! {
//!   "error": {
//!     "message": "Rating must be between 1 and 5, got 7",
//!     "type": "invalid_request_error",
//!     "param": "rating",
//!     "code": "validation_error"
//!   }
//! }
//! ```

mod analytics;
mod health;
mod reviews;
pub mod types;

pub use health::{BannerResponse, HealthResponse, SERVICE_NAME};
pub use types::*;

use crate::agent::TextGenerator;
use crate::config::AppConfig;
use crate::metrics::MetricsCollector;
use crate::pipeline::ReviewPipeline;
use crate::store::ReviewStore;
use axum::{http::HeaderValue, routing::get, Router};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Maximum request body size (1 MB). Reviews are capped at 5000 characters.
const MAX_BODY_SIZE: usize = 1024 * 1024;

/// Shared application state accessible to all handlers.
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub pipeline: Arc<ReviewPipeline>,
    pub store: Arc<dyn ReviewStore>,
    /// Metrics handle and uptime tracking
    pub metrics: Arc<MetricsCollector>,
}

impl AppState {
    /// Wire the pipeline and metrics around an agent and a store.
    pub fn new(
        config: Arc<AppConfig>,
        agent: Arc<dyn TextGenerator>,
        store: Arc<dyn ReviewStore>,
    ) -> Self {
        let pipeline = Arc::new(
            ReviewPipeline::new(agent, Arc::clone(&store))
                .with_content_logging(config.logging.enable_content_logging),
        );

        let metrics = Arc::new(MetricsCollector::new(
            Instant::now(),
            crate::metrics::global_handle(),
        ));

        Self {
            config,
            pipeline,
            store,
            metrics,
        }
    }
}

/// Create the main API router with all endpoints and middleware configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.server.cors_origins);
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    Router::new()
        .route("/", get(health::banner))
        .route("/api/reviews", get(reviews::list).post(reviews::create))
        .route("/api/analytics", get(analytics::handle))
        .route("/api/health", get(health::handle))
        .route("/metrics", get(crate::metrics::handler::metrics_handler))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TimeoutLayer::new(timeout))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for the configured browser origins. `"*"` allows any origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.iter().any(|o| o.trim() == "*") {
        return base.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    base.allow_origin(AllowOrigin::list(allowed))
}

//! Health check and service banner handlers.

use crate::api::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;

pub const SERVICE_NAME: &str = "review-insight";

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub uptime_seconds: u64,
    /// "ok" or "unavailable"
    pub database: String,
    /// Agent name, or "disabled" when every stage runs on fallbacks.
    pub generation: String,
}

/// Service banner returned at `/`.
#[derive(Debug, Serialize)]
pub struct BannerResponse {
    pub message: String,
    pub version: String,
}

/// GET /api/health - Return service health.
///
/// A disabled generation agent does not make the service unhealthy; an
/// unreachable database does (503).
pub async fn handle(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let database_ok = match state.store.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check: database unavailable");
            false
        }
    };

    let agent = state.pipeline.agent();
    let generation = if agent.is_enabled() {
        agent.name().to_string()
    } else {
        "disabled".to_string()
    };

    let (status_code, status) = if database_ok {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        status_code,
        Json(HealthResponse {
            status: status.to_string(),
            service: SERVICE_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: state.metrics.uptime_seconds(),
            database: if database_ok { "ok" } else { "unavailable" }.to_string(),
            generation,
        }),
    )
}

/// GET / - Service banner.
pub async fn banner() -> Json<BannerResponse> {
    Json(BannerResponse {
        message: "Review Insight API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

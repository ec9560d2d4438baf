//! Analytics endpoint handler.

use super::{ApiError, AppState};
use crate::model::Analytics;
use axum::{extract::State, Json};
use std::sync::Arc;

/// GET /api/analytics - Totals, average rating and both distributions.
pub async fn handle(State(state): State<Arc<AppState>>) -> Result<Json<Analytics>, ApiError> {
    let analytics = state.store.analytics().await?;
    Ok(Json(analytics))
}

//! Review submission and listing handlers.

use super::{ApiError, AppState, CreateReviewRequest, ListReviewsParams};
use crate::logging::{request_id_from_headers, REQUEST_ID_HEADER};
use crate::model::Review;
use crate::store::ReviewPage;
use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

/// POST /api/reviews - Analyse and store a review.
///
/// Returns `201 Created` with the stored review. The request ID (from the
/// caller's `x-request-id` or freshly generated) is echoed back.
pub async fn create(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<CreateReviewRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::bad_request(&e.body_text()))?;
    let request_id = request_id_from_headers(&headers);

    let review: Review = state
        .pipeline
        .submit_with_request_id(request.rating, &request.review_text, &request_id)
        .await?;

    let mut response = (StatusCode::CREATED, Json(review)).into_response();
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    Ok(response)
}

/// GET /api/reviews - List reviews, newest first, with optional filters.
pub async fn list(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ListReviewsParams>, QueryRejection>,
) -> Result<Json<ReviewPage>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::bad_request(&e.body_text()))?;
    let query = params.into_query(&state.config.reviews)?;

    let page = state.store.list(&query).await?;
    Ok(Json(page))
}

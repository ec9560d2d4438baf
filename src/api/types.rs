//! Request, query and error types for the HTTP API.

use crate::config::ReviewsConfig;
use crate::model::{Sentiment, MAX_RATING, MIN_RATING};
use crate::pipeline::{PipelineError, ValidationError};
use crate::store::{ReviewQuery, StoreError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/reviews`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateReviewRequest {
    /// Kept wide so out-of-range values reach validation instead of failing to parse.
    pub rating: i64,
    pub review_text: String,
}

/// Query string of `GET /api/reviews`.
///
/// Filters arrive as strings so that empty values (`?sentiment=`) can be
/// treated as absent rather than rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListReviewsParams {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
    pub rating: Option<String>,
    pub sentiment: Option<String>,
    pub search: Option<String>,
}

impl ListReviewsParams {
    /// Resolve paging defaults and parse the filters.
    pub fn into_query(self, limits: &ReviewsConfig) -> Result<ReviewQuery, ApiError> {
        let rating = match non_empty(self.rating) {
            None => None,
            Some(raw) => Some(parse_rating(&raw)?),
        };

        let sentiment = match non_empty(self.sentiment) {
            None => None,
            Some(raw) => Some(raw.parse::<Sentiment>().map_err(|_| {
                ApiError::invalid_param(
                    "sentiment",
                    &format!(
                        "Invalid sentiment '{}'. Expected one of: positive, negative, neutral, sarcasm",
                        raw
                    ),
                )
            })?),
        };

        Ok(ReviewQuery {
            skip: self.skip.unwrap_or(0),
            limit: limits.page_size(self.limit),
            rating,
            sentiment,
            search: non_empty(self.search),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_rating(raw: &str) -> Result<u8, ApiError> {
    raw.trim()
        .parse::<u8>()
        .ok()
        .filter(|r| (MIN_RATING..=MAX_RATING).contains(r))
        .ok_or_else(|| {
            ApiError::invalid_param(
                "rating",
                &format!("Rating filter must be an integer between 1 and 5, got '{}'", raw),
            )
        })
}

/// Error response envelope: `{"error": {"message", "type", "param"?, "code"?}}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub error: ApiErrorBody,
}

/// Error details.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiErrorBody {
    pub message: String,
    pub r#type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ApiError {
    /// Create a bad request error (400).
    pub fn bad_request(message: &str) -> Self {
        Self {
            error: ApiErrorBody {
                message: message.to_string(),
                r#type: "invalid_request_error".to_string(),
                param: None,
                code: Some("invalid_request_error".to_string()),
            },
        }
    }

    /// Create a bad request error (400) naming the offending parameter.
    pub fn invalid_param(param: &str, message: &str) -> Self {
        Self {
            error: ApiErrorBody {
                message: message.to_string(),
                r#type: "invalid_request_error".to_string(),
                param: Some(param.to_string()),
                code: Some("invalid_request_error".to_string()),
            },
        }
    }

    /// Create a validation error (400) for a rejected submission.
    pub fn validation(err: &ValidationError) -> Self {
        Self {
            error: ApiErrorBody {
                message: err.to_string(),
                r#type: "invalid_request_error".to_string(),
                param: Some(err.field().to_string()),
                code: Some("validation_error".to_string()),
            },
        }
    }

    /// Create an internal storage error (500). Details stay in the logs.
    pub fn storage() -> Self {
        Self {
            error: ApiErrorBody {
                message: "Review storage is unavailable".to_string(),
                r#type: "server_error".to_string(),
                param: None,
                code: Some("storage_error".to_string()),
            },
        }
    }

    /// Create a service unavailable error (503).
    pub fn service_unavailable(message: &str) -> Self {
        Self {
            error: ApiErrorBody {
                message: message.to_string(),
                r#type: "server_error".to_string(),
                param: None,
                code: Some("service_unavailable".to_string()),
            },
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self.error.code.as_deref() {
            Some("invalid_request_error") | Some("validation_error") => StatusCode::BAD_REQUEST,
            Some("service_unavailable") => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Validation(e) => ApiError::validation(&e),
            PipelineError::Storage(_) => ApiError::storage(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        tracing::error!(error = %err, "Store query failed");
        ApiError::storage()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}

//! Input checks applied before any model call or storage access.

use crate::model::{MAX_RATING, MAX_REVIEW_CHARS, MIN_RATING};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(i64),

    #[error("Review text must not be empty")]
    EmptyText,

    #[error("Review text must be at most {max} characters, got {length}")]
    TextTooLong { length: usize, max: usize },
}

impl ValidationError {
    /// Request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::RatingOutOfRange(_) => "rating",
            ValidationError::EmptyText | ValidationError::TextTooLong { .. } => "review_text",
        }
    }
}

/// A submission that passed validation. `text` is already trimmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedReview<'a> {
    pub rating: u8,
    pub text: &'a str,
}

/// Check the rating range and the trimmed text length (in characters).
pub fn validate(rating: i64, review_text: &str) -> Result<ValidatedReview<'_>, ValidationError> {
    let rating = u8::try_from(rating)
        .ok()
        .filter(|r| (MIN_RATING..=MAX_RATING).contains(r))
        .ok_or(ValidationError::RatingOutOfRange(rating))?;

    let text = review_text.trim();
    if text.is_empty() {
        return Err(ValidationError::EmptyText);
    }

    let length = text.chars().count();
    if length > MAX_REVIEW_CHARS {
        return Err(ValidationError::TextTooLong {
            length,
            max: MAX_REVIEW_CHARS,
        });
    }

    Ok(ValidatedReview { rating, text })
}

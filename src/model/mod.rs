//! Domain types for stored reviews.
//!
//! A [`Review`] is created once by the ingestion pipeline and never mutated
//! afterwards. [`Sentiment`] is a closed set: every stored review carries one
//! of the four labels, including reviews whose classification fell back to the
//! rating heuristic.

pub mod analytics;

pub use analytics::{Analytics, RatingDistribution, SentimentDistribution};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lowest accepted star rating.
pub const MIN_RATING: u8 = 1;

/// Highest accepted star rating.
pub const MAX_RATING: u8 = 5;

/// Maximum review length, in characters, after trimming.
pub const MAX_REVIEW_CHARS: usize = 5000;

/// Emotional tone of a review relative to its rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    Sarcasm,
}

impl Sentiment {
    /// All labels in their canonical order.
    pub const ALL: [Sentiment; 4] = [
        Sentiment::Positive,
        Sentiment::Negative,
        Sentiment::Neutral,
        Sentiment::Sarcasm,
    ];

    /// Lowercase label as stored and serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
            Sentiment::Sarcasm => "sarcasm",
        }
    }

    /// Position in [`Sentiment::ALL`], used to index fixed-size tables.
    pub fn index(&self) -> usize {
        match self {
            Sentiment::Positive => 0,
            Sentiment::Negative => 1,
            Sentiment::Neutral => 2,
            Sentiment::Sarcasm => 3,
        }
    }

    /// Deterministic label derived from the star rating alone.
    ///
    /// Never returns [`Sentiment::Sarcasm`]: sarcasm can only come from a
    /// validated model classification.
    pub fn from_rating(rating: u8) -> Self {
        if rating >= 4 {
            Sentiment::Positive
        } else if rating <= 2 {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Ok(Sentiment::Positive),
            "negative" => Ok(Sentiment::Negative),
            "neutral" => Ok(Sentiment::Neutral),
            "sarcasm" => Ok(Sentiment::Sarcasm),
            _ => Err(format!("Invalid sentiment: {}", s)),
        }
    }
}

/// A persisted review with its generated analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub rating: u8,
    pub review_text: String,
    pub sentiment: Sentiment,
    pub ai_response: String,
    pub ai_summary: String,
    pub recommended_actions: String,
    pub created_at: DateTime<Utc>,
}

/// A fully analysed review that has not been stored yet.
///
/// The store assigns `id` and `created_at` on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub rating: u8,
    pub review_text: String,
    pub sentiment: Sentiment,
    pub ai_response: String,
    pub ai_summary: String,
    pub recommended_actions: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_from_rating() {
        assert_eq!(Sentiment::from_rating(1), Sentiment::Negative);
        assert_eq!(Sentiment::from_rating(2), Sentiment::Negative);
        assert_eq!(Sentiment::from_rating(3), Sentiment::Neutral);
        assert_eq!(Sentiment::from_rating(4), Sentiment::Positive);
        assert_eq!(Sentiment::from_rating(5), Sentiment::Positive);
    }

    #[test]
    fn test_sentiment_from_str() {
        assert_eq!(Sentiment::from_str("positive").unwrap(), Sentiment::Positive);
        assert_eq!(Sentiment::from_str(" Sarcasm\n").unwrap(), Sentiment::Sarcasm);
        assert_eq!(Sentiment::from_str("NEUTRAL").unwrap(), Sentiment::Neutral);
        assert!(Sentiment::from_str("mixed").is_err());
        assert!(Sentiment::from_str("").is_err());
    }

    #[test]
    fn test_sentiment_serde() {
        let json = serde_json::to_string(&Sentiment::Sarcasm).unwrap();
        assert_eq!(json, "\"sarcasm\"");

        let parsed: Sentiment = serde_json::from_str("\"negative\"").unwrap();
        assert_eq!(parsed, Sentiment::Negative);
    }

    #[test]
    fn test_sentiment_index_matches_all() {
        for (i, sentiment) in Sentiment::ALL.iter().enumerate() {
            assert_eq!(sentiment.index(), i);
        }
    }

    #[test]
    fn test_review_serialize_field_names() {
        let review = Review {
            id: 7,
            rating: 4,
            review_text: "Fast delivery".to_string(),
            sentiment: Sentiment::Positive,
            ai_response: "Thanks!".to_string(),
            ai_summary: "Happy with delivery.".to_string(),
            recommended_actions: "1. Keep it up".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&review).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["rating"], 4);
        assert_eq!(json["sentiment"], "positive");
        assert_eq!(json["recommended_actions"], "1. Keep it up");
        assert!(json["created_at"].is_string());
    }
}

//! Aggregate statistics over stored reviews.
//!
//! Both distributions are fixed-size tables indexed by a closed key set, so
//! every key is always present in the serialized output, zero or not.

use super::{Sentiment, MAX_RATING, MIN_RATING};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Review counts per sentiment label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentimentDistribution {
    counts: [u64; 4],
}

impl SentimentDistribution {
    pub fn get(&self, sentiment: Sentiment) -> u64 {
        self.counts[sentiment.index()]
    }

    pub fn set(&mut self, sentiment: Sentiment, count: u64) {
        self.counts[sentiment.index()] = count;
    }

    /// Iterate `(label, count)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Sentiment, u64)> + '_ {
        Sentiment::ALL.iter().map(|s| (*s, self.counts[s.index()]))
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

impl Serialize for SentimentDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.counts.len()))?;
        for (sentiment, count) in self.iter() {
            map.serialize_entry(sentiment.as_str(), &count)?;
        }
        map.end()
    }
}

/// Review counts per star rating, keyed `"1"` through `"5"` when serialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingDistribution {
    counts: [u64; MAX_RATING as usize],
}

impl RatingDistribution {
    /// Count for `rating`; out-of-range ratings have no bucket and read as zero.
    pub fn get(&self, rating: u8) -> u64 {
        Self::slot(rating).map(|i| self.counts[i]).unwrap_or(0)
    }

    /// Set the count for `rating`. Returns `false` if the rating has no bucket.
    pub fn set(&mut self, rating: u8, count: u64) -> bool {
        match Self::slot(rating) {
            Some(i) => {
                self.counts[i] = count;
                true
            }
            None => false,
        }
    }

    /// Iterate `(rating, count)` pairs from 1 to 5.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        (MIN_RATING..=MAX_RATING).map(|r| (r, self.get(r)))
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    fn slot(rating: u8) -> Option<usize> {
        (MIN_RATING..=MAX_RATING)
            .contains(&rating)
            .then(|| (rating - MIN_RATING) as usize)
    }
}

impl Serialize for RatingDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.counts.len()))?;
        for (rating, count) in self.iter() {
            map.serialize_entry(&rating.to_string(), &count)?;
        }
        map.end()
    }
}

/// Dashboard analytics over all stored reviews.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Analytics {
    pub total_reviews: u64,
    pub average_rating: f64,
    pub sentiment_distribution: SentimentDistribution,
    pub rating_distribution: RatingDistribution,
}

/// Round to two decimal places, ties to even; `None` (no reviews) becomes `0.0`.
pub fn round_average(average: Option<f64>) -> f64 {
    match average {
        Some(avg) if avg.is_finite() => (avg * 100.0).round_ties_even() / 100.0,
        _ => 0.0,
    }
}

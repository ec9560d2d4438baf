//! Review analysis stages.
//!
//! Each stage asks the text-generation agent for one piece of analysis and
//! owns a deterministic fallback for when that request fails. Stages never
//! return errors to their caller: they return an [`Outcome`], which records
//! whether the value came from the model or from the fallback and why.
//!
//! | Stage | Budget | Temperature | Fallback |
//! |---|---|---|---|
//! | sentiment | 10 | 0.3 | rating heuristic |
//! | response | 150 | 0.7 | short per-sentiment template |
//! | summary | 50 | 0.5 | rating + first 100 chars |
//! | recommendations | 200 | 0.7 | per-sentiment checklist |

pub mod recommendations;
pub mod response;
pub mod sentiment;
pub mod summary;

pub use recommendations::RecommendationGenerator;
pub use response::ResponseGenerator;
pub use sentiment::SentimentClassifier;
pub use summary::SummaryGenerator;

use crate::agent::AgentError;
use std::fmt;
use thiserror::Error;

/// Why a stage could not use the model's output.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The agent call itself failed.
    #[error(transparent)]
    Agent(#[from] AgentError),

    /// The model answered, but not with one of the valid sentiment labels.
    #[error("Model returned invalid label: {0:?}")]
    InvalidLabel(String),
}

impl AnalysisError {
    /// Short, label-safe reason for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::Agent(e) => e.kind(),
            AnalysisError::InvalidLabel(_) => "invalid_label",
        }
    }
}

/// Result of running one analysis stage.
#[derive(Debug)]
pub enum Outcome<T> {
    /// The model produced a usable value.
    Generated(T),
    /// The model failed; `value` is the stage's deterministic fallback.
    Fallback { value: T, reason: AnalysisError },
}

impl<T> Outcome<T> {
    /// Turn a model attempt into an outcome, computing the fallback on failure.
    pub fn resolve(attempt: Result<T, AnalysisError>, fallback: impl FnOnce() -> T) -> Self {
        match attempt {
            Ok(value) => Outcome::Generated(value),
            Err(reason) => Outcome::Fallback {
                value: fallback(),
                reason,
            },
        }
    }

    pub fn value(&self) -> &T {
        match self {
            Outcome::Generated(value) => value,
            Outcome::Fallback { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Outcome::Generated(value) => value,
            Outcome::Fallback { value, .. } => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Outcome::Fallback { .. })
    }
}

/// The four analysis stages, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Sentiment,
    Response,
    Summary,
    Recommendations,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Sentiment => "sentiment",
            Stage::Response => "response",
            Stage::Summary => "summary",
            Stage::Recommendations => "recommendations",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

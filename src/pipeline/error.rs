use super::ValidationError;
use crate::store::StoreError;
use thiserror::Error;

/// Errors that can escape [`ReviewPipeline::submit`](super::ReviewPipeline::submit).
///
/// Model failures never appear here; every stage absorbs them with its fallback.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Invalid review: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to store review: {0}")]
    Storage(#[from] StoreError),
}

impl PipelineError {
    /// Label used for the rejection metric.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::Validation(_) => "validation",
            PipelineError::Storage(_) => "storage",
        }
    }
}

//! Error types for agent operations.

use thiserror::Error;

/// Errors that can occur while calling the text-generation service.
#[derive(Error, Debug)]
pub enum AgentError {
    /// Network connectivity error (DNS, connection refused, etc.).
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded deadline.
    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    /// Service returned an error response (4xx, 5xx).
    #[error("Upstream error {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Response doesn't match the expected format.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Response parsed but carried no usable text.
    #[error("Empty response from model")]
    EmptyResponse,

    /// Agent configuration error (missing API key, bad URL).
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl AgentError {
    /// Short, label-safe name for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AgentError::Network(_) => "network",
            AgentError::Timeout(_) => "timeout",
            AgentError::Upstream { .. } => "upstream",
            AgentError::InvalidResponse(_) => "invalid_response",
            AgentError::EmptyResponse => "empty_response",
            AgentError::Configuration(_) => "configuration",
        }
    }
}

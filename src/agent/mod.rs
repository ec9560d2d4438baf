//! Text-generation agent abstraction.
//!
//! This module provides the `TextGenerator` trait that the analysis stages call
//! for every model interaction, plus the concrete agents behind it.

use async_trait::async_trait;

pub mod disabled;
pub mod error;
pub mod factory;
#[cfg(test)]
pub(crate) mod mock;
pub mod openai;
pub mod types;

pub use disabled::DisabledAgent;
pub use error::AgentError;
pub use factory::create_agent;
pub use openai::OpenAIAgent;
pub use types::GenerationRequest;

/// Capability to turn a role-tagged prompt into text.
///
/// # Object Safety
///
/// This trait is object-safe and designed to be injected as
/// `Arc<dyn TextGenerator>`, so tests can swap in scripted doubles.
///
/// # Cancellation Safety
///
/// Dropping the future aborts any in-flight HTTP request.
#[async_trait]
pub trait TextGenerator: Send + Sync + 'static {
    /// Human-readable name for logging (e.g., "openai/gpt-3.5-turbo").
    fn name(&self) -> &str;

    /// Whether this agent can reach a model at all.
    ///
    /// Disabled agents fail every call, so every stage uses its fallback.
    fn is_enabled(&self) -> bool {
        true
    }

    /// Generate text for a single request.
    ///
    /// # Returns
    ///
    /// - `Ok(String)` with the trimmed, non-empty model output
    /// - `Err(AgentError::Upstream)` if the service returned 4xx/5xx
    /// - `Err(AgentError::Network)` if the connection failed
    /// - `Err(AgentError::Timeout)` if the request exceeded its deadline
    /// - `Err(AgentError::InvalidResponse)` / `Err(AgentError::EmptyResponse)` on malformed output
    async fn generate(&self, request: GenerationRequest) -> Result<String, AgentError>;
}

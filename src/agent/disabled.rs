//! Agent used when no model is configured.

use super::{AgentError, GenerationRequest, TextGenerator};
use async_trait::async_trait;

/// Agent that rejects every request.
///
/// Used when the API key is missing so the service still starts; every
/// analysis stage then resolves to its static fallback.
pub struct DisabledAgent {
    reason: String,
}

impl DisabledAgent {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

#[async_trait]
impl TextGenerator for DisabledAgent {
    fn name(&self) -> &str {
        "disabled"
    }

    fn is_enabled(&self) -> bool {
        false
    }

    async fn generate(&self, _request: GenerationRequest) -> Result<String, AgentError> {
        Err(AgentError::Configuration(self.reason.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_agent_always_fails() {
        let agent = DisabledAgent::new("OPENAI_API_KEY not set");
        assert!(!agent.is_enabled());

        let result = agent.generate(GenerationRequest::new("sys", "hi")).await;
        match result {
            Err(AgentError::Configuration(msg)) => assert_eq!(msg, "OPENAI_API_KEY not set"),
            other => panic!("Expected configuration error, got {:?}", other),
        }
    }
}

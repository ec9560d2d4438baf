//! In-crate test double for `TextGenerator`.

use super::{AgentError, GenerationRequest, TextGenerator};
use async_trait::async_trait;
use std::sync::Mutex;

/// Agent that answers every request the same way and records what it saw.
pub(crate) struct MockAgent {
    reply: Option<String>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl MockAgent {
    pub(crate) fn replying(text: &str) -> Self {
        Self {
            reply: Some(text.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            reply: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for MockAgent {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, request: GenerationRequest) -> Result<String, AgentError> {
        self.requests.lock().unwrap().push(request);
        self.reply
            .clone()
            .ok_or_else(|| AgentError::Network("connection refused".to_string()))
    }
}

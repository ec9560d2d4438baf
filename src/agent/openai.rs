//! OpenAI agent implementation.

use super::types::{ChatCompletionRequest, ChatCompletionResponse};
use super::{AgentError, GenerationRequest, TextGenerator};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// OpenAI-compatible chat completion agent.
///
/// Sends every generation request to `POST {base_url}/v1/chat/completions`
/// with Bearer authentication and returns the first choice's text.
pub struct OpenAIAgent {
    /// Human-readable name ("openai/<model>")
    name: String,
    /// Base URL (e.g., "https://api.openai.com")
    base_url: String,
    /// Model identifier sent with each request
    model: String,
    /// API key for Bearer authentication
    api_key: String,
    /// Per-request deadline
    timeout: Duration,
    /// Shared HTTP client for connection pooling
    client: Arc<Client>,
}

impl OpenAIAgent {
    pub fn new(
        base_url: String,
        model: String,
        api_key: String,
        timeout: Duration,
        client: Arc<Client>,
    ) -> Self {
        Self {
            name: format!("openai/{}", model),
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            api_key,
            timeout,
            client,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for OpenAIAgent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, request: GenerationRequest) -> Result<String, AgentError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = ChatCompletionRequest::from_generation(&self.model, &request);
        let timeout_ms = self.timeout.as_millis() as u64;

        let response = self
            .client
            .post(&url)
            .header("authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AgentError::Timeout(timeout_ms)
                } else {
                    AgentError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AgentError::Upstream {
                status: status.as_u16(),
                message: error_body,
            });
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            AgentError::InvalidResponse(format!("Failed to parse completion response: {}", e))
        })?;

        completion
            .first_text()
            .map(str::to_string)
            .ok_or(AgentError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn test_agent(base_url: String) -> OpenAIAgent {
        OpenAIAgent::new(
            base_url,
            "gpt-3.5-turbo".to_string(),
            "sk-test123".to_string(),
            Duration::from_secs(5),
            Arc::new(Client::new()),
        )
    }

    fn completion_body(content: &str) -> String {
        serde_json::json!({
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "created": 1699999999,
            "model": "gpt-3.5-turbo",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }]
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_generate_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer sk-test123")
            .with_status(200)
            .with_body(completion_body("  positive\n"))
            .create_async()
            .await;

        let agent = test_agent(server.url());
        let text = agent
            .generate(GenerationRequest::new("sys", "classify"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(text, "positive");
    }

    #[tokio::test]
    async fn test_generate_sends_budget_and_temperature() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "model": "gpt-3.5-turbo",
                "max_tokens": 10,
                "temperature": 0.3,
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": "classify"}
                ]
            })))
            .with_status(200)
            .with_body(completion_body("neutral"))
            .create_async()
            .await;

        let agent = test_agent(server.url());
        let request = GenerationRequest::new("sys", "classify")
            .with_max_tokens(10)
            .with_temperature(0.3);
        agent.generate(request).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_upstream_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(429)
            .with_body("rate limited")
            .create_async()
            .await;

        let agent = test_agent(server.url());
        let result = agent.generate(GenerationRequest::new("sys", "x")).await;

        match result {
            Err(AgentError::Upstream { status, message }) => {
                assert_eq!(status, 429);
                assert_eq!(message, "rate limited");
            }
            other => panic!("Expected upstream error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_generate_malformed_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let agent = test_agent(server.url());
        let result = agent.generate(GenerationRequest::new("sys", "x")).await;
        assert!(matches!(result, Err(AgentError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_generate_empty_choices() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let agent = test_agent(server.url());
        let result = agent.generate(GenerationRequest::new("sys", "x")).await;
        assert!(matches!(result, Err(AgentError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_generate_connection_refused() {
        // Port 1 is reserved and nothing listens there
        let agent = test_agent("http://127.0.0.1:1".to_string());
        let result = agent.generate(GenerationRequest::new("sys", "x")).await;
        assert!(matches!(result, Err(AgentError::Network(_))));
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let agent = test_agent("https://api.openai.com/".to_string());
        assert_eq!(agent.base_url, "https://api.openai.com");
        assert_eq!(agent.name(), "openai/gpt-3.5-turbo");
        assert_eq!(agent.model(), "gpt-3.5-turbo");
    }
}

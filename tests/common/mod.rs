//! Shared test utilities for review-insight integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use review_insight::agent::{AgentError, GenerationRequest, TextGenerator};
use review_insight::api::{create_router, AppState};
use review_insight::config::AppConfig;
use review_insight::store::SqliteReviewStore;
use std::sync::{Arc, Mutex};

/// UUID v4 string length: "xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx"
pub const UUID_V4_STRING_LEN: usize = 36;

/// Canned answers per analysis stage, picked by the system instruction.
#[derive(Debug, Clone)]
pub struct Script {
    pub sentiment: Option<String>,
    pub response: Option<String>,
    pub summary: Option<String>,
    pub recommendations: Option<String>,
}

impl Script {
    /// Every stage answers successfully; the classifier says `label`.
    pub fn answering(label: &str) -> Self {
        Self {
            sentiment: Some(label.to_string()),
            response: Some(format!("Reply for a {} review", label)),
            summary: Some("Short summary.".to_string()),
            recommendations: Some("1. Follow up with the customer".to_string()),
        }
    }

    /// Every stage fails.
    pub fn failing() -> Self {
        Self {
            sentiment: None,
            response: None,
            summary: None,
            recommendations: None,
        }
    }
}

/// Agent that answers each stage from a [`Script`] and records calls.
pub struct ScriptedAgent {
    script: Script,
    calls: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedAgent {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<GenerationRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedAgent {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, request: GenerationRequest) -> Result<String, AgentError> {
        let answer = if request.system.contains("sentiment") {
            self.script.sentiment.clone()
        } else if request.system.contains("summarizing") {
            self.script.summary.clone()
        } else if request.system.contains("business consultant") {
            self.script.recommendations.clone()
        } else {
            self.script.response.clone()
        };
        self.calls.lock().unwrap().push(request);
        answer.ok_or_else(|| AgentError::Network("scripted failure".to_string()))
    }
}

/// Fresh in-memory store with the schema applied.
pub async fn memory_store() -> Arc<SqliteReviewStore> {
    Arc::new(SqliteReviewStore::in_memory().await.unwrap())
}

/// Router over an in-memory store and the given agent.
pub async fn test_app(agent: Arc<dyn TextGenerator>) -> (axum::Router, Arc<SqliteReviewStore>) {
    let store = memory_store().await;
    let state = Arc::new(AppState::new(
        Arc::new(AppConfig::default()),
        agent,
        store.clone(),
    ));
    (create_router(state), store)
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_to_json(body: Body) -> serde_json::Value {
    serde_json::from_str(&body_to_string(body).await).unwrap()
}

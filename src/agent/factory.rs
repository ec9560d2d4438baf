//! Agent factory for creating TextGenerator trait objects from configuration.

use super::{DisabledAgent, OpenAIAgent, TextGenerator};
use crate::config::GenerationConfig;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Create the generation agent described by `config`.
///
/// The API key is read from the environment variable named by
/// `config.api_key_env`. A missing or empty key yields a [`DisabledAgent`]
/// instead of an error: the pipeline stays available and every stage falls
/// back to its static output.
///
/// # Examples
///
/// ```
/// use review_insight::agent::create_agent;
/// use review_insight::config::GenerationConfig;
/// use reqwest::Client;
/// use std::sync::Arc;
///
/// let config = GenerationConfig {
///     enabled: false,
///     ..GenerationConfig::default()
/// };
/// let agent = create_agent(&config, Arc::new(Client::new()));
/// assert!(!agent.is_enabled());
/// ```
pub fn create_agent(config: &GenerationConfig, client: Arc<Client>) -> Arc<dyn TextGenerator> {
    if !config.enabled {
        tracing::info!("Text generation disabled by configuration, using fallbacks only");
        return Arc::new(DisabledAgent::new("generation disabled by configuration"));
    }

    let api_key = match std::env::var(&config.api_key_env) {
        Ok(key) if !key.trim().is_empty() => key,
        _ => {
            tracing::warn!(
                api_key_env = %config.api_key_env,
                "API key not set, text generation disabled; reviews will use fallback analysis"
            );
            return Arc::new(DisabledAgent::new(format!(
                "API key environment variable '{}' is not set",
                config.api_key_env
            )));
        }
    };

    let agent = OpenAIAgent::new(
        config.base_url.clone(),
        config.model.clone(),
        api_key,
        Duration::from_secs(config.timeout_seconds),
        client,
    );
    tracing::info!(
        agent = %agent.name(),
        base_url = %config.base_url,
        "Text generation agent configured"
    );

    Arc::new(agent)
}

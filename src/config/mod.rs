//! Configuration module for the review service
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`REVIEW_INSIGHT_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use review_insight::config::AppConfig;
//!
//! let config = AppConfig::default();
//! assert_eq!(config.server.port, 8000);
//!
//! let toml = r#"
//! [database]
//! url = "sqlite::memory:"
//! "#;
//! let config: AppConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.database.url, "sqlite::memory:");
//! ```

pub mod database;
pub mod error;
pub mod generation;
pub mod logging;
pub mod reviews;
pub mod server;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use generation::GenerationConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use reviews::ReviewsConfig;
pub use server::ServerConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration for the review service.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Review store connection
    pub database: DatabaseConfig,
    /// External text-generation service
    pub generation: GenerationConfig,
    /// Listing limits
    pub reviews: ReviewsConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supports REVIEW_INSIGHT_* environment variables for common settings.
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(port) = std::env::var("REVIEW_INSIGHT_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Ok(host) = std::env::var("REVIEW_INSIGHT_HOST") {
            self.server.host = host;
        }
        if let Ok(origins) = std::env::var("REVIEW_INSIGHT_CORS_ORIGINS") {
            let origins: Vec<String> = origins
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
            if !origins.is_empty() {
                self.server.cors_origins = origins;
            }
        }

        if let Ok(url) = std::env::var("REVIEW_INSIGHT_DATABASE_URL") {
            self.database.url = url;
        }
        if let Ok(model) = std::env::var("REVIEW_INSIGHT_MODEL") {
            self.generation.model = model;
        }

        if let Ok(level) = std::env::var("REVIEW_INSIGHT_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("REVIEW_INSIGHT_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::invalid("server.port", "port must be non-zero"));
        }
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::invalid("database.url", "URL cannot be empty"));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::invalid(
                "database.max_connections",
                "must be at least 1",
            ));
        }
        if self.generation.base_url.trim().is_empty() {
            return Err(ConfigError::invalid("generation.base_url", "URL cannot be empty"));
        }
        if self.generation.model.trim().is_empty() {
            return Err(ConfigError::invalid("generation.model", "model cannot be empty"));
        }
        if self.reviews.default_page_size == 0 || self.reviews.max_page_size == 0 {
            return Err(ConfigError::invalid("reviews", "page sizes must be non-zero"));
        }
        if self.reviews.default_page_size > self.reviews.max_page_size {
            return Err(ConfigError::invalid(
                "reviews.default_page_size",
                "cannot exceed max_page_size",
            ));
        }

        Ok(())
    }
}

//! Database configuration

use serde::{Deserialize, Serialize};

/// Connection settings for the review store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// sqlx connection URL, e.g. `sqlite://review-insight.db`
    pub url: String,
    pub max_connections: u32,
    /// Create the database file on first connect
    pub create_if_missing: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://review-insight.db".to_string(),
            max_connections: 5,
            create_if_missing: true,
        }
    }
}

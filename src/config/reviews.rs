//! Review listing configuration

use serde::{Deserialize, Serialize};

/// Paging limits for review listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewsConfig {
    /// Page size used when a request omits `limit`
    pub default_page_size: u32,
    /// Upper bound applied to any requested `limit`
    pub max_page_size: u32,
}

impl Default for ReviewsConfig {
    fn default() -> Self {
        Self {
            default_page_size: 100,
            max_page_size: 1000,
        }
    }
}

impl ReviewsConfig {
    /// Resolve a requested page size against the configured bounds.
    pub fn page_size(&self, requested: Option<u32>) -> u32 {
        requested
            .unwrap_or(self.default_page_size)
            .min(self.max_page_size)
    }
}

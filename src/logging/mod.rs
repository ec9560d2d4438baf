//! Structured logging helpers
//!
//! Filter construction for the tracing subscriber, request ID handling, and
//! privacy-safe previews of review text.

pub mod fields;
pub mod middleware;

pub use fields::text_preview;
pub use middleware::{generate_request_id, request_id_from_headers, REQUEST_ID_HEADER};

/// Build filter directives string from LoggingConfig
///
/// Combines the base level with any per-component levels, producing
/// `"base_level,review_insight::component=level,..."`. Components are sorted
/// so the result is stable.
///
/// # Examples
///
/// ```
/// use review_insight::config::{LogFormat, LoggingConfig};
/// use review_insight::logging::build_filter_directives;
/// use std::collections::HashMap;
///
/// let mut component_levels = HashMap::new();
/// component_levels.insert("pipeline".to_string(), "debug".to_string());
///
/// let config = LoggingConfig {
///     level: "info".to_string(),
///     format: LogFormat::Pretty,
///     component_levels: Some(component_levels),
///     enable_content_logging: false,
/// };
///
/// assert_eq!(build_filter_directives(&config), "info,review_insight::pipeline=debug");
/// ```
pub fn build_filter_directives(config: &crate::config::LoggingConfig) -> String {
    let mut filter_str = config.level.clone();

    if let Some(component_levels) = &config.component_levels {
        let mut components: Vec<_> = component_levels.iter().collect();
        components.sort();
        for (component, level) in components {
            filter_str.push_str(&format!(",review_insight::{}={}", component, level));
        }
    }

    filter_str
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoggingConfig;
    use std::collections::HashMap;

    #[test]
    fn test_filter_without_components() {
        let config = LoggingConfig {
            level: "warn".to_string(),
            ..LoggingConfig::default()
        };
        assert_eq!(build_filter_directives(&config), "warn");
    }

    #[test]
    fn test_filter_components_sorted() {
        let mut levels = HashMap::new();
        levels.insert("store".to_string(), "trace".to_string());
        levels.insert("agent".to_string(), "debug".to_string());

        let config = LoggingConfig {
            component_levels: Some(levels),
            ..LoggingConfig::default()
        };

        assert_eq!(
            build_filter_directives(&config),
            "info,review_insight::agent=debug,review_insight::store=trace"
        );
    }
}

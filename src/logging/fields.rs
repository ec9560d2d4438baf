//! Field helpers for structured logging

/// Characters of review text kept in a log preview.
pub const PREVIEW_CHARS: usize = 100;

/// Preview of review text for logs (privacy-safe).
///
/// Returns `None` unless content logging is enabled. Long text is cut at
/// [`PREVIEW_CHARS`] characters and marked with `...`.
///
/// # Examples
///
/// ```
/// use review_insight::logging::text_preview;
///
/// assert_eq!(text_preview("Great service!", false), None);
/// assert_eq!(text_preview("Great service!", true).as_deref(), Some("Great service!"));
/// ```
pub fn text_preview(text: &str, enable_content_logging: bool) -> Option<String> {
    if !enable_content_logging || text.is_empty() {
        return None;
    }
    Some(truncate_chars(text, PREVIEW_CHARS))
}

fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}...", &s[..byte_index]),
        None => s.to_string(),
    }
}

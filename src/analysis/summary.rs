//! One-sentence summary stage for the admin dashboard.

use super::Outcome;
use crate::agent::{GenerationRequest, TextGenerator};
use std::sync::Arc;

const SYSTEM_PROMPT: &str = "You are an expert at summarizing customer feedback.";
const MAX_TOKENS: u32 = 50;
const TEMPERATURE: f32 = 0.5;

/// Characters of review text kept by the fallback summary.
pub const FALLBACK_PREVIEW_CHARS: usize = 100;

#[derive(Clone)]
pub struct SummaryGenerator {
    agent: Arc<dyn TextGenerator>,
}

impl SummaryGenerator {
    pub fn new(agent: Arc<dyn TextGenerator>) -> Self {
        Self { agent }
    }

    pub async fn generate(&self, review_text: &str, rating: u8) -> Outcome<String> {
        let attempt = self
            .agent
            .generate(build_request(review_text, rating))
            .await
            .map_err(Into::into);
        Outcome::resolve(attempt, || fallback(review_text, rating))
    }
}

/// `Customer rated {rating}/5 stars: {first 100 chars}...`
///
/// Counts characters, not bytes, so multi-byte text is never split mid-character.
/// The ellipsis is appended even when the text is shorter than the preview.
pub fn fallback(review_text: &str, rating: u8) -> String {
    let preview: String = review_text.chars().take(FALLBACK_PREVIEW_CHARS).collect();
    format!("Customer rated {}/5 stars: {}...", rating, preview)
}

fn build_request(review_text: &str, rating: u8) -> GenerationRequest {
    let prompt = format!(
        "Summarize this customer review (rating: {rating}/5) in one concise sentence:\n\
         \"{review_text}\"\n\n\
         Focus on the main praise or concern."
    );

    GenerationRequest::new(SYSTEM_PROMPT, prompt)
        .with_max_tokens(MAX_TOKENS)
        .with_temperature(TEMPERATURE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::mock::MockAgent;

    #[test]
    fn test_fallback_short_text() {
        assert_eq!(
            fallback("Great service!", 5),
            "Customer rated 5/5 stars: Great service!..."
        );
    }

    #[test]
    fn test_fallback_truncates_to_100_chars() {
        let text = "a".repeat(250);
        let summary = fallback(&text, 2);
        assert_eq!(summary, format!("Customer rated 2/5 stars: {}...", "a".repeat(100)));
    }

    #[test]
    fn test_fallback_counts_characters_not_bytes() {
        let text = "é".repeat(150);
        let summary = fallback(&text, 3);
        let preview = summary
            .strip_prefix("Customer rated 3/5 stars: ")
            .and_then(|s| s.strip_suffix("..."))
            .unwrap();
        assert_eq!(preview.chars().count(), 100);
    }

    #[tokio::test]
    async fn test_failure_uses_fallback() {
        let generator = SummaryGenerator::new(Arc::new(MockAgent::failing()));
        let outcome = generator.generate("Box was crushed", 1).await;

        assert!(outcome.is_fallback());
        assert_eq!(outcome.into_value(), "Customer rated 1/5 stars: Box was crushed...");
    }

    #[tokio::test]
    async fn test_model_summary_used() {
        let agent = Arc::new(MockAgent::replying("Customer praises fast delivery."));
        let generator = SummaryGenerator::new(agent.clone());

        let outcome = generator.generate("Arrived next day, amazing", 5).await;

        assert_eq!(outcome.into_value(), "Customer praises fast delivery.");
        let requests = agent.requests();
        assert_eq!(requests[0].max_tokens, 50);
        assert_eq!(requests[0].temperature, 0.5);
    }
}

//! Business recommendation stage.

use super::Outcome;
use crate::agent::{GenerationRequest, TextGenerator};
use crate::model::Sentiment;
use std::sync::Arc;

const SYSTEM_PROMPT: &str =
    "You are a business consultant specializing in e-commerce customer experience.";
const MAX_TOKENS: u32 = 200;
const TEMPERATURE: f32 = 0.7;

/// Suggests 2-3 follow-up actions for the business.
#[derive(Clone)]
pub struct RecommendationGenerator {
    agent: Arc<dyn TextGenerator>,
}

impl RecommendationGenerator {
    pub fn new(agent: Arc<dyn TextGenerator>) -> Self {
        Self { agent }
    }

    pub async fn generate(
        &self,
        review_text: &str,
        rating: u8,
        sentiment: Sentiment,
    ) -> Outcome<String> {
        let attempt = self
            .agent
            .generate(build_request(review_text, rating, sentiment))
            .await
            .map_err(Into::into);
        Outcome::resolve(attempt, || fallback(sentiment).to_string())
    }
}

/// Static checklist used when the model is unavailable.
///
/// Neutral and sarcasm share the default branch.
pub fn fallback(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => {
            "1. Share positive feedback with team\n\
             2. Maintain current service quality\n\
             3. Request customer testimonial"
        }
        Sentiment::Negative => {
            "1. Contact customer immediately\n\
             2. Investigate root cause\n\
             3. Implement corrective measures"
        }
        Sentiment::Neutral | Sentiment::Sarcasm => {
            "1. Follow up with customer for more details\n\
             2. Monitor for patterns\n\
             3. Continue service improvements"
        }
    }
}

fn build_request(review_text: &str, rating: u8, sentiment: Sentiment) -> GenerationRequest {
    let prompt = format!(
        "Based on this {sentiment} review (rating: {rating}/5):\n\
         \"{review_text}\"\n\n\
         Give 2-3 specific, actionable recommendations for the business to:\n\
         1. Address the feedback\n\
         2. Improve the customer experience\n\
         3. Prevent similar issues (if negative) or replicate the success (if positive)\n\n\
         Be concise and practical."
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
    fn test_fallback_lists() {
        assert_eq!(
            fallback(Sentiment::Positive),
            "1. Share positive feedback with team\n2. Maintain current service quality\n3. Request customer testimonial"
        );
        assert_eq!(
            fallback(Sentiment::Negative),
            "1. Contact customer immediately\n2. Investigate root cause\n3. Implement corrective measures"
        );
        assert_eq!(
            fallback(Sentiment::Neutral),
            "1. Follow up with customer for more details\n2. Monitor for patterns\n3. Continue service improvements"
        );
    }

    #[test]
    fn test_neutral_and_sarcasm_share_fallback() {
        assert_eq!(fallback(Sentiment::Neutral), fallback(Sentiment::Sarcasm));
        assert_eq!(fallback(Sentiment::Positive).lines().count(), 3);
    }

    #[tokio::test]
    async fn test_failure_uses_fallback() {
        let generator = RecommendationGenerator::new(Arc::new(MockAgent::failing()));
        let outcome = generator.generate("meh", 3, Sentiment::Sarcasm).await;

        assert!(outcome.is_fallback());
        assert_eq!(outcome.into_value(), fallback(Sentiment::Neutral));
    }

    #[tokio::test]
    async fn test_request_mentions_sentiment() {
        let agent = Arc::new(MockAgent::replying("1. Refund\n2. Call back"));
        let generator = RecommendationGenerator::new(agent.clone());

        let outcome = generator.generate("Broken on arrival", 1, Sentiment::Negative).await;

        assert_eq!(outcome.into_value(), "1. Refund\n2. Call back");
        let requests = agent.requests();
        assert!(requests[0].prompt.starts_with("Based on this negative review (rating: 1/5)"));
        assert_eq!(requests[0].max_tokens, 200);
    }
}

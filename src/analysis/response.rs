//! Customer-facing reply stage.

use super::Outcome;
use crate::agent::{GenerationRequest, TextGenerator};
use crate::model::Sentiment;
use std::sync::Arc;

const SYSTEM_PROMPT: &str = "You are a customer service expert for an e-commerce platform.";
const MAX_TOKENS: u32 = 150;
const TEMPERATURE: f32 = 0.7;

/// Writes the reply shown to the customer after submitting a review.
#[derive(Clone)]
pub struct ResponseGenerator {
    agent: Arc<dyn TextGenerator>,
}

impl ResponseGenerator {
    pub fn new(agent: Arc<dyn TextGenerator>) -> Self {
        Self { agent }
    }

    pub async fn generate(
        &self,
        review_text: &str,
        rating: u8,
        sentiment: Sentiment,
    ) -> Outcome<String> {
        let request = build_request(review_text, rating, sentiment);
        let attempt = self.agent.generate(request).await.map_err(Into::into);
        Outcome::resolve(attempt, || fallback(sentiment).to_string())
    }
}

/// Seed reply handed to the model for personalisation.
pub fn base_template(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => {
            "Thank you for your wonderful feedback! We're thrilled to hear about your positive \
             experience with us. Your satisfaction is our top priority, and we look forward to \
             serving you again!"
        }
        Sentiment::Negative => {
            "We sincerely apologize for your disappointing experience. Your feedback is \
             invaluable to us, and we'll be more careful next time. Our team will review this \
             immediately to ensure we improve. Please contact our support team so we can make \
             this right."
        }
        Sentiment::Neutral => {
            "Thank you for taking the time to share your feedback. We appreciate your honest \
             review and are always working to improve our services. If there's anything \
             specific we can help with, please let us know!"
        }
        Sentiment::Sarcasm => {
            "We appreciate your feedback and understand your concerns. We take all reviews \
             seriously and would like to address any issues you've experienced. Our team is \
             committed to improving, and we'd love the opportunity to make things right."
        }
    }
}

/// Reply used verbatim when the model is unavailable.
pub fn fallback(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => {
            "Thank you for your wonderful feedback! We're thrilled to hear about your positive \
             experience with us."
        }
        Sentiment::Negative => {
            "We sincerely apologize for your experience. We'll be more careful next time and \
             work to improve."
        }
        Sentiment::Neutral => {
            "Thank you for your feedback. We appreciate your input and are always working to \
             improve."
        }
        Sentiment::Sarcasm => {
            "We appreciate your feedback and take all reviews seriously. We're committed to \
             improving your experience."
        }
    }
}

fn build_request(review_text: &str, rating: u8, sentiment: Sentiment) -> GenerationRequest {
    let prompt = format!(
        "Write a brief, empathetic reply to this {sentiment} review (rating: {rating}/5):\n\
         \"{review_text}\"\n\n\
         Base reply: {base}\n\n\
         Make it more personal and specific to what the customer wrote. Stay under 100 words, \
         professional and action-oriented.",
        base = base_template(sentiment),
    );

    GenerationRequest::new(SYSTEM_PROMPT, prompt)
        .with_max_tokens(MAX_TOKENS)
        .with_temperature(TEMPERATURE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::mock::MockAgent;

    #[tokio::test]
    async fn test_model_reply_is_used() {
        let agent = Arc::new(MockAgent::replying("Thanks, Sam! Glad the shoes fit."));
        let generator = ResponseGenerator::new(agent);

        let outcome = generator
            .generate("Shoes fit perfectly", 5, Sentiment::Positive)
            .await;

        assert!(!outcome.is_fallback());
        assert_eq!(outcome.into_value(), "Thanks, Sam! Glad the shoes fit.");
    }

    #[tokio::test]
    async fn test_failure_returns_fallback_verbatim() {
        let generator = ResponseGenerator::new(Arc::new(MockAgent::failing()));

        for sentiment in Sentiment::ALL {
            let outcome = generator.generate("text", 3, sentiment).await;
            assert!(outcome.is_fallback());
            assert_eq!(outcome.into_value(), fallback(sentiment));
        }
    }

    #[test]
    fn test_fallbacks_are_shorter_than_templates() {
        for sentiment in Sentiment::ALL {
            assert!(fallback(sentiment).len() < base_template(sentiment).len());
            assert!(!fallback(sentiment).contains("  "));
        }
    }

    #[test]
    fn test_positive_fallback_text() {
        assert_eq!(
            fallback(Sentiment::Positive),
            "Thank you for your wonderful feedback! We're thrilled to hear about your positive experience with us."
        );
    }

    #[tokio::test]
    async fn test_request_is_seeded_with_template() {
        let agent = Arc::new(MockAgent::replying("ok"));
        let generator = ResponseGenerator::new(agent.clone());

        generator.generate("Late again", 2, Sentiment::Negative).await;

        let requests = agent.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].prompt.contains("negative review (rating: 2/5)"));
        assert!(requests[0].prompt.contains(base_template(Sentiment::Negative)));
        assert_eq!(requests[0].max_tokens, 150);
        assert_eq!(requests[0].temperature, 0.7);
    }
}

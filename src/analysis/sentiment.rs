//! Sentiment classification stage.

use super::{AnalysisError, Outcome};
use crate::agent::{GenerationRequest, TextGenerator};
use crate::model::Sentiment;
use std::str::FromStr;
use std::sync::Arc;

const SYSTEM_PROMPT: &str = "You are a sentiment analysis expert for e-commerce feedback.";
const MAX_TOKENS: u32 = 10;
const TEMPERATURE: f32 = 0.3;

/// Labels a review as positive, negative, neutral or sarcasm.
#[derive(Clone)]
pub struct SentimentClassifier {
    agent: Arc<dyn TextGenerator>,
}

impl SentimentClassifier {
    pub fn new(agent: Arc<dyn TextGenerator>) -> Self {
        Self { agent }
    }

    /// Classify a review, falling back to [`Sentiment::from_rating`] when the
    /// model fails or answers outside the label set.
    pub async fn classify(&self, review_text: &str, rating: u8) -> Outcome<Sentiment> {
        let attempt = self.attempt(review_text, rating).await;
        Outcome::resolve(attempt, || Sentiment::from_rating(rating))
    }

    async fn attempt(&self, review_text: &str, rating: u8) -> Result<Sentiment, AnalysisError> {
        let answer = self.agent.generate(build_request(review_text, rating)).await?;
        parse_label(&answer)
    }
}

/// Accept only a single valid label, ignoring case and surrounding whitespace.
fn parse_label(answer: &str) -> Result<Sentiment, AnalysisError> {
    Sentiment::from_str(answer).map_err(|_| AnalysisError::InvalidLabel(answer.to_string()))
}

fn build_request(review_text: &str, rating: u8) -> GenerationRequest {
    let prompt = format!(
        "Classify the sentiment of this customer review (rating: {rating}/5):\n\
         \"{review_text}\"\n\n\
         Valid labels: positive, negative, neutral, sarcasm\n\n\
         Take into account:\n\
         - A mismatch between the rating and the text may signal sarcasm\n\
         - Tone and word choice\n\
         - The overall emotion\n\n\
         Answer with exactly one lowercase word: positive, negative, neutral, or sarcasm"
    );

    GenerationRequest::new(SYSTEM_PROMPT, prompt)
        .with_max_tokens(MAX_TOKENS)
        .with_temperature(TEMPERATURE)
}

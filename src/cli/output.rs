//! Output formatting helpers for CLI commands

use crate::model::{Analytics, Review, Sentiment};
use crate::store::ReviewPage;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde_json::json;

/// Characters of review text and summary shown per table cell.
const CELL_PREVIEW_CHARS: usize = 60;

/// Colored sentiment label for terminal output.
pub fn sentiment_label(sentiment: Sentiment) -> String {
    match sentiment {
        Sentiment::Positive => "positive".green().to_string(),
        Sentiment::Negative => "negative".red().to_string(),
        Sentiment::Neutral => "neutral".yellow().to_string(),
        Sentiment::Sarcasm => "sarcasm".magenta().to_string(),
    }
}

/// Star string for a rating, e.g. `★★★☆☆`.
pub fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

fn preview(text: &str) -> String {
    let flat = text.replace('\n', " ");
    match flat.char_indices().nth(CELL_PREVIEW_CHARS) {
        Some((idx, _)) => format!("{}…", &flat[..idx]),
        None => flat,
    }
}

/// Format a page of reviews as a table, followed by a "showing" footer.
pub fn format_reviews_table(page: &ReviewPage, skip: u32) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Rating", "Sentiment", "Review", "Summary", "Created"]);

    for review in &page.reviews {
        table.add_row(review_row(review));
    }

    let shown = page.reviews.len() as u64;
    let footer = if shown == 0 {
        format!("No reviews to show ({} total)", page.total)
    } else {
        let first = u64::from(skip) + 1;
        format!("Showing {}-{} of {}", first, u64::from(skip) + shown, page.total)
    };

    format!("{}\n{}", table, footer)
}

fn review_row(review: &Review) -> Vec<Cell> {
    vec![
        Cell::new(review.id),
        Cell::new(stars(review.rating)),
        Cell::new(sentiment_label(review.sentiment)),
        Cell::new(preview(&review.review_text)),
        Cell::new(preview(&review.ai_summary)),
        Cell::new(review.created_at.format("%Y-%m-%d %H:%M")),
    ]
}

/// Format a page of reviews as JSON (`{"reviews": [...], "total": n}`).
pub fn format_reviews_json(page: &ReviewPage) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({
        "reviews": page.reviews,
        "total": page.total,
    }))
}

/// Format analytics as two tables: sentiment and rating distributions.
pub fn format_analytics_table(analytics: &Analytics) -> String {
    let total = analytics.total_reviews;
    let share = |count: u64| {
        if total == 0 {
            "0.0%".to_string()
        } else {
            format!("{:.1}%", count as f64 * 100.0 / total as f64)
        }
    };

    let mut sentiments = Table::new();
    sentiments.load_preset(UTF8_FULL);
    sentiments.set_content_arrangement(ContentArrangement::Dynamic);
    sentiments.set_header(vec!["Sentiment", "Reviews", "Share"]);
    for (sentiment, count) in analytics.sentiment_distribution.iter() {
        sentiments.add_row(vec![
            Cell::new(sentiment_label(sentiment)),
            Cell::new(count),
            Cell::new(share(count)),
        ]);
    }

    let mut ratings = Table::new();
    ratings.load_preset(UTF8_FULL);
    ratings.set_content_arrangement(ContentArrangement::Dynamic);
    ratings.set_header(vec!["Rating", "Reviews", "Share"]);
    let mut by_rating: Vec<(u8, u64)> = analytics.rating_distribution.iter().collect();
    by_rating.reverse();
    for (rating, count) in by_rating {
        ratings.add_row(vec![
            Cell::new(stars(rating)),
            Cell::new(count),
            Cell::new(share(count)),
        ]);
    }

    format!(
        "Total reviews: {}\nAverage rating: {:.2}\n\n{}\n\n{}",
        total, analytics.average_rating, sentiments, ratings
    )
}

/// Format analytics as JSON.
pub fn format_analytics_json(analytics: &Analytics) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(analytics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn create_test_review(id: i64, rating: u8, sentiment: Sentiment) -> Review {
        Review {
            id,
            rating,
            review_text: "Delivery was quick\nand the box was intact".to_string(),
            sentiment,
            ai_response: "Thanks!".to_string(),
            ai_summary: "Happy with delivery.".to_string(),
            recommended_actions: "1. Keep it up".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_stars() {
        assert_eq!(stars(1), "★☆☆☆☆");
        assert_eq!(stars(5), "★★★★★");
    }

    #[test]
    fn test_preview_flattens_and_truncates() {
        assert_eq!(preview("a\nb"), "a b");
        let long = "z".repeat(80);
        assert_eq!(preview(&long), format!("{}…", "z".repeat(60)));
    }

    #[test]
    fn test_format_reviews_table_empty() {
        let page = ReviewPage {
            reviews: vec![],
            total: 0,
        };
        let output = format_reviews_table(&page, 0);
        assert!(output.contains("Sentiment"));
        assert!(output.contains("No reviews to show (0 total)"));
    }

    #[test]
    fn test_format_reviews_table_with_data() {
        let page = ReviewPage {
            reviews: vec![
                create_test_review(9, 5, Sentiment::Positive),
                create_test_review(8, 1, Sentiment::Negative),
            ],
            total: 12,
        };
        let output = format_reviews_table(&page, 4);
        assert!(output.contains("Delivery was quick and the box"));
        assert!(output.contains("positive"));
        assert!(output.contains("Showing 5-6 of 12"));
    }

    #[test]
    fn test_format_reviews_json_valid() {
        let page = ReviewPage {
            reviews: vec![create_test_review(1, 3, Sentiment::Sarcasm)],
            total: 1,
        };
        let output = format_reviews_json(&page).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["total"], 1);
        assert_eq!(parsed["reviews"][0]["sentiment"], "sarcasm");
    }

    #[test]
    fn test_format_analytics_table() {
        let mut analytics = Analytics {
            total_reviews: 4,
            average_rating: 3.5,
            ..Analytics::default()
        };
        analytics.sentiment_distribution.set(Sentiment::Positive, 3);
        analytics.sentiment_distribution.set(Sentiment::Negative, 1);
        analytics.rating_distribution.set(5, 3);
        analytics.rating_distribution.set(1, 1);

        let output = format_analytics_table(&analytics);
        assert!(output.contains("Total reviews: 4"));
        assert!(output.contains("Average rating: 3.50"));
        assert!(output.contains("75.0%"));
        assert!(output.contains("sarcasm"));
    }

    #[test]
    fn test_format_analytics_table_empty_has_no_nan() {
        let output = format_analytics_table(&Analytics::default());
        assert!(output.contains("0.0%"));
        assert!(!output.contains("NaN"));
    }

    #[test]
    fn test_format_analytics_json_keys() {
        let output = format_analytics_json(&Analytics::default()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["sentiment_distribution"]["sarcasm"], 0);
        assert_eq!(parsed["rating_distribution"]["5"], 0);
    }
}

//! Reviews command implementation

use crate::cli::output::{format_reviews_json, format_reviews_table};
use crate::cli::ReviewsArgs;
use crate::config::ReviewsConfig;
use crate::store::{ReviewQuery, ReviewStore};

/// Build the store query from command-line filters.
pub fn build_query(args: &ReviewsArgs, limits: &ReviewsConfig) -> ReviewQuery {
    ReviewQuery {
        skip: args.skip,
        limit: limits.page_size(args.limit),
        rating: args.rating,
        sentiment: args.sentiment,
        search: args.search.clone().filter(|s| !s.trim().is_empty()),
    }
}

/// Handle reviews command
pub async fn handle_reviews(
    args: &ReviewsArgs,
    store: &dyn ReviewStore,
    limits: &ReviewsConfig,
) -> Result<String, Box<dyn std::error::Error>> {
    let query = build_query(args, limits);
    let page = store.list(&query).await?;

    if args.json {
        Ok(format_reviews_json(&page)?)
    } else {
        Ok(format_reviews_table(&page, query.skip))
    }
}

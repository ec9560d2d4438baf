//! Analytics command implementation

use crate::cli::output::{format_analytics_json, format_analytics_table};
use crate::cli::AnalyticsArgs;
use crate::store::ReviewStore;

/// Handle analytics command
pub async fn handle_analytics(
    args: &AnalyticsArgs,
    store: &dyn ReviewStore,
) -> Result<String, Box<dyn std::error::Error>> {
    let analytics = store.analytics().await?;

    if args.json {
        Ok(format_analytics_json(&analytics)?)
    } else {
        Ok(format_analytics_table(&analytics))
    }
}

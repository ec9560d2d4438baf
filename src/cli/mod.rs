//! CLI module for the review service
//!
//! Command-line interface definitions and handlers.
//!
//! # Commands
//!
//! - `serve` - Start the HTTP API
//! - `reviews` - List stored reviews
//! - `analytics` - Show aggregate review statistics
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Start server with default config
//! review-insight serve
//!
//! # Negative reviews mentioning "refund", as JSON
//! review-insight reviews --sentiment negative --search refund --json
//!
//! # Generate shell completions
//! review-insight completions bash > ~/.bash_completion.d/review-insight
//! ```

pub mod analytics;
pub mod completions;
pub mod config;
pub mod output;
pub mod reviews;
pub mod serve;

pub use completions::handle_completions;
pub use config::handle_config_init;

use crate::config::AppConfig;
use crate::model::Sentiment;
use crate::store::SqliteReviewStore;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "review-insight.toml";

/// Review Insight - customer review analysis service
#[derive(Parser, Debug)]
#[command(
    name = "review-insight",
    version,
    about = "Customer review ingestion with generated replies, summaries and analytics"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API server
    Serve(ServeArgs),
    /// List stored reviews
    Reviews(ReviewsArgs),
    /// Show review analytics
    Analytics(AnalyticsArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Override server port
    #[arg(short, long, env = "REVIEW_INSIGHT_PORT")]
    pub port: Option<u16>,

    /// Override server host
    #[arg(short = 'H', long, env = "REVIEW_INSIGHT_HOST")]
    pub host: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "REVIEW_INSIGHT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Override database URL
    #[arg(long, env = "REVIEW_INSIGHT_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Never call the text-generation service; every stage uses its fallback
    #[arg(long)]
    pub no_generation: bool,
}

/// Options shared by the read-only store commands.
#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Override database URL
    #[arg(long, env = "REVIEW_INSIGHT_DATABASE_URL")]
    pub database_url: Option<String>,
}

impl StoreArgs {
    /// Open the configured store without creating a missing database.
    pub async fn open_store(
        &self,
    ) -> Result<(AppConfig, SqliteReviewStore), Box<dyn std::error::Error>> {
        let mut config = load_config(&self.config)?;
        if let Some(ref url) = self.database_url {
            config.database.url = url.clone();
        }
        config.database.create_if_missing = false;

        let store = SqliteReviewStore::connect(&config.database).await?;
        Ok((config, store))
    }
}

#[derive(Args, Debug)]
pub struct ReviewsArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Number of reviews to skip
    #[arg(long, default_value_t = 0)]
    pub skip: u32,

    /// Maximum number of reviews to show
    #[arg(short = 'n', long)]
    pub limit: Option<u32>,

    /// Only reviews with this star rating
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub rating: Option<u8>,

    /// Only reviews with this sentiment (positive, negative, neutral, sarcasm)
    #[arg(short, long)]
    pub sentiment: Option<Sentiment>,

    /// Case-insensitive text search
    #[arg(long)]
    pub search: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct AnalyticsArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

/// Load the config file if it exists (defaults otherwise), then apply
/// `REVIEW_INSIGHT_*` environment overrides.
pub fn load_config(path: &Path) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let config = if path.exists() {
        AppConfig::load(Some(path))?
    } else {
        tracing::debug!(path = %path.display(), "Config file not found, using defaults");
        AppConfig::default()
    };

    Ok(config.with_env_overrides())
}

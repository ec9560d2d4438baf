//! SQLite-backed review store.

use super::{schema, ReviewPage, ReviewQuery, ReviewStore, StoreError};
use crate::config::DatabaseConfig;
use crate::model::analytics::round_average;
use crate::model::{Analytics, NewReview, Review, Sentiment, MAX_RATING, MIN_RATING};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow};
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use std::str::FromStr;

const SELECT_COLUMNS: &str = "SELECT id, rating, review_text, sentiment, ai_response, ai_summary, recommended_actions, created_at FROM reviews";

/// Review store over a shared `sqlx` SQLite pool.
#[derive(Debug, Clone)]
pub struct SqliteReviewStore {
    pool: SqlitePool,
}

impl SqliteReviewStore {
    /// Open the configured database and create the schema if needed.
    ///
    /// In-memory databases are private to a connection, so they are pinned to
    /// a single long-lived connection.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let in_memory = is_in_memory(&config.url);

        let mut options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|e| StoreError::InvalidUrl {
                url: config.url.clone(),
                message: e.to_string(),
            })?
            .create_if_missing(config.create_if_missing);
        if !in_memory {
            options = options.journal_mode(SqliteJournalMode::Wal);
        }

        let mut pool_options = SqlitePoolOptions::new();
        pool_options = if in_memory {
            pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            pool_options.max_connections(config.max_connections)
        };

        let pool = pool_options.connect_with(options).await?;
        let store = Self::from_pool(pool).await?;

        tracing::info!(
            url = %config.url,
            max_connections = if in_memory { 1 } else { config.max_connections },
            "Review store ready"
        );

        Ok(store)
    }

    /// Fresh private in-memory store, mainly for tests and demos.
    pub async fn in_memory() -> Result<Self, StoreError> {
        Self::connect(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            ..DatabaseConfig::default()
        })
        .await
    }

    /// Wrap an existing pool, creating the schema if needed.
    pub async fn from_pool(pool: SqlitePool) -> Result<Self, StoreError> {
        schema::migrate(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the pool; later operations fail with a storage error.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl ReviewStore for SqliteReviewStore {
    async fn insert(&self, review: NewReview) -> Result<Review, StoreError> {
        let mut tx = self.pool.begin().await?;

        let (id, created_at): (i64, String) = sqlx::query_as(
            "INSERT INTO reviews (rating, review_text, review_text_folded, sentiment, ai_response, ai_summary, recommended_actions) \
             VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING id, created_at",
        )
        .bind(i64::from(review.rating))
        .bind(&review.review_text)
        .bind(schema::fold_text(&review.review_text))
        .bind(review.sentiment.as_str())
        .bind(&review.ai_response)
        .bind(&review.ai_summary)
        .bind(&review.recommended_actions)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Review {
            id,
            rating: review.rating,
            review_text: review.review_text,
            sentiment: review.sentiment,
            ai_response: review.ai_response,
            ai_summary: review.ai_summary,
            recommended_actions: review.recommended_actions,
            created_at: parse_timestamp(id, &created_at)?,
        })
    }

    async fn list(&self, query: &ReviewQuery) -> Result<ReviewPage, StoreError> {
        let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM reviews");
        push_filters(&mut count, query);
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        let mut select = QueryBuilder::<Sqlite>::new(SELECT_COLUMNS);
        push_filters(&mut select, query);
        select
            .push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(i64::from(query.limit))
            .push(" OFFSET ")
            .push_bind(i64::from(query.skip));

        let rows = select.build().fetch_all(&self.pool).await?;
        let reviews = rows
            .iter()
            .map(review_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ReviewPage {
            reviews,
            total: total.max(0) as u64,
        })
    }

    async fn analytics(&self) -> Result<Analytics, StoreError> {
        let (total, average): (i64, Option<f64>) =
            sqlx::query_as("SELECT COUNT(*), AVG(rating) FROM reviews")
                .fetch_one(&self.pool)
                .await?;

        let mut analytics = Analytics {
            total_reviews: total.max(0) as u64,
            average_rating: round_average(average),
            ..Analytics::default()
        };

        let by_sentiment: Vec<(String, i64)> =
            sqlx::query_as("SELECT sentiment, COUNT(*) FROM reviews GROUP BY sentiment")
                .fetch_all(&self.pool)
                .await?;
        for (label, count) in by_sentiment {
            match label.parse::<Sentiment>() {
                Ok(sentiment) => analytics
                    .sentiment_distribution
                    .set(sentiment, count.max(0) as u64),
                Err(_) => tracing::warn!(label = %label, count, "Ignoring unknown sentiment label"),
            }
        }

        let by_rating: Vec<(i64, i64)> =
            sqlx::query_as("SELECT rating, COUNT(*) FROM reviews GROUP BY rating")
                .fetch_all(&self.pool)
                .await?;
        for (rating, count) in by_rating {
            let stored = u8::try_from(rating)
                .map(|r| analytics.rating_distribution.set(r, count.max(0) as u64))
                .unwrap_or(false);
            if !stored {
                tracing::warn!(rating, count, "Ignoring out-of-range rating");
            }
        }

        Ok(analytics)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Append the optional filters as a conjunctive WHERE clause.
fn push_filters<'a>(builder: &mut QueryBuilder<'a, Sqlite>, query: &'a ReviewQuery) {
    let mut separator = " WHERE ";

    if let Some(rating) = query.rating {
        builder.push(separator).push("rating = ").push_bind(i64::from(rating));
        separator = " AND ";
    }
    if let Some(sentiment) = query.sentiment {
        builder
            .push(separator)
            .push("sentiment = ")
            .push_bind(sentiment.as_str());
        separator = " AND ";
    }
    if let Some(search) = query.search.as_deref() {
        // instr() instead of LIKE so '%' and '_' in the search term match literally
        builder
            .push(separator)
            .push("instr(review_text_folded, ")
            .push_bind(schema::fold_text(search))
            .push(") > 0");
    }
}

fn review_from_row(row: &SqliteRow) -> Result<Review, StoreError> {
    let id: i64 = row.try_get("id")?;

    let raw_rating: i64 = row.try_get("rating")?;
    let rating = u8::try_from(raw_rating)
        .ok()
        .filter(|r| (MIN_RATING..=MAX_RATING).contains(r))
        .ok_or_else(|| StoreError::corrupt(id, format!("rating {} out of range", raw_rating)))?;

    let label: String = row.try_get("sentiment")?;
    let sentiment = label
        .parse::<Sentiment>()
        .map_err(|e| StoreError::corrupt(id, e))?;

    let created_at: String = row.try_get("created_at")?;

    Ok(Review {
        id,
        rating,
        review_text: row.try_get("review_text")?,
        sentiment,
        ai_response: row.try_get("ai_response")?,
        ai_summary: row.try_get("ai_summary")?,
        recommended_actions: row.try_get("recommended_actions")?,
        created_at: parse_timestamp(id, &created_at)?,
    })
}

fn parse_timestamp(id: i64, raw: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| StoreError::corrupt(id, format!("created_at '{}': {}", raw, e)))
}

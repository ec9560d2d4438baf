//! Table layout for persisted reviews.

use super::StoreError;
use sqlx::SqlitePool;

/// `created_at` is stored as RFC 3339 text with millisecond precision so that
/// lexical order matches chronological order.
pub const CREATE_REVIEWS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS reviews (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    rating INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
    review_text TEXT NOT NULL,
    review_text_folded TEXT NOT NULL DEFAULT '',
    sentiment TEXT NOT NULL CHECK (sentiment IN ('positive', 'negative', 'neutral', 'sarcasm')),
    ai_response TEXT NOT NULL,
    ai_summary TEXT NOT NULL,
    recommended_actions TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
)
"#;

pub const CREATE_INDEXES: [&str; 3] = [
    "CREATE INDEX IF NOT EXISTS idx_reviews_created_at ON reviews (created_at)",
    "CREATE INDEX IF NOT EXISTS idx_reviews_rating ON reviews (rating)",
    "CREATE INDEX IF NOT EXISTS idx_reviews_sentiment ON reviews (sentiment)",
];

/// Lowercased copy of `review_text` used by text search.
///
/// SQLite's `lower()` only folds ASCII, so folding happens here instead.
pub fn fold_text(text: &str) -> String {
    text.to_lowercase()
}

/// Create the reviews table and its indexes if they do not exist yet.
pub async fn migrate(pool: &SqlitePool) -> Result<(), StoreError> {
    sqlx::query(CREATE_REVIEWS_TABLE).execute(pool).await?;
    add_folded_column(pool).await?;
    for statement in CREATE_INDEXES {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

/// Databases created before `review_text_folded` existed get the column
/// added and backfilled once.
async fn add_folded_column(pool: &SqlitePool) -> Result<(), StoreError> {
    let (present,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM pragma_table_info('reviews') WHERE name = 'review_text_folded'",
    )
    .fetch_one(pool)
    .await?;
    if present > 0 {
        return Ok(());
    }

    let mut tx = pool.begin().await?;
    sqlx::query("ALTER TABLE reviews ADD COLUMN review_text_folded TEXT NOT NULL DEFAULT ''")
        .execute(&mut *tx)
        .await?;

    let rows: Vec<(i64, String)> = sqlx::query_as("SELECT id, review_text FROM reviews")
        .fetch_all(&mut *tx)
        .await?;
    for (id, text) in &rows {
        sqlx::query("UPDATE reviews SET review_text_folded = ? WHERE id = ?")
            .bind(fold_text(text))
            .bind(id)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;

    tracing::info!(backfilled = rows.len(), "Added folded search column to reviews");
    Ok(())
}

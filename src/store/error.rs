use thiserror::Error;

/// Errors raised by the review store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid database URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Corrupt review row {id}: {message}")]
    CorruptRow { id: i64, message: String },
}

impl StoreError {
    pub(crate) fn corrupt(id: i64, message: impl Into<String>) -> Self {
        StoreError::CorruptRow {
            id,
            message: message.into(),
        }
    }
}

//! Domain service for the prohibited-word denylist.

use thiserror::Error;

use crate::db::BadWord;

#[derive(Debug, Error)]
pub enum BadWordError {
    #[error("Word not found")]
    NotFound,

    #[error("Word already exists")]
    AlreadyExists,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for BadWordError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for BadWordError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Words are normalized to lowercase on the way in so the moderation check
/// can stay a plain substring match.
#[async_trait::async_trait]
pub trait BadWordService: Send + Sync {
    async fn list(&self) -> Result<Vec<BadWord>, BadWordError>;

    async fn add(&self, word: &str) -> Result<BadWord, BadWordError>;

    async fn update(&self, id: i32, new_word: &str) -> Result<(), BadWordError>;

    async fn delete(&self, id: i32) -> Result<(), BadWordError>;
}

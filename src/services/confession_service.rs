//! Domain service for the confession wall.
//!
//! Covers submission (with the moderation pipeline), listing, voting, and the
//! admin moderation actions.

use thiserror::Error;

use crate::db::{Confession, ConfessionFilter};

/// Errors specific to confession operations.
#[derive(Debug, Error)]
pub enum ConfessionError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Message contains prohibited words")]
    ProhibitedWords,

    #[error("A very similar confession already exists")]
    DuplicateContent,

    #[error("You already voted")]
    AlreadyVoted,

    #[error("Confession not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for ConfessionError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for ConfessionError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Submission input after the HTTP layer has applied its trims.
#[derive(Debug, Clone)]
pub struct ConfessionSubmission {
    pub name: Option<String>,
    pub message: String,
    pub ip_hash: String,
    pub user_id: Option<i32>,
}

/// One page of confessions.
#[derive(Debug, Clone)]
pub struct ConfessionPage {
    pub items: Vec<Confession>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
}

/// Domain service trait for the wall.
#[async_trait::async_trait]
pub trait ConfessionService: Send + Sync {
    /// Runs the moderation pipeline and stores the confession.
    ///
    /// # Errors
    ///
    /// Returns [`ConfessionError::Validation`] for short messages,
    /// [`ConfessionError::ProhibitedWords`] on a denylist hit, and
    /// [`ConfessionError::DuplicateContent`] when a near-duplicate is found.
    async fn create(&self, submission: ConfessionSubmission)
    -> Result<Confession, ConfessionError>;

    /// Lists confessions matching the filter, newest first.
    async fn list(
        &self,
        filter: ConfessionFilter,
        page: u64,
        limit: u64,
    ) -> Result<ConfessionPage, ConfessionError>;

    /// Records a vote and returns the confession with updated counters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfessionError::AlreadyVoted`] for a repeat (confession,
    /// hash) pair and [`ConfessionError::NotFound`] for an unknown id.
    async fn vote(
        &self,
        confession_id: i32,
        value: i32,
        ip_hash: &str,
    ) -> Result<Confession, ConfessionError>;

    /// Sets the confession APPROVED and notifies clients.
    async fn approve(&self, id: i32) -> Result<Confession, ConfessionError>;

    /// Sets the confession REJECTED. Rejections are not broadcast.
    async fn reject(&self, id: i32) -> Result<Confession, ConfessionError>;

    /// Deletes the confession; associated votes cascade.
    async fn delete(&self, id: i32) -> Result<(), ConfessionError>;

    /// Unpaginated export for the admin CSV download.
    async fn export(&self, filter: ConfessionFilter) -> Result<Vec<Confession>, ConfessionError>;
}

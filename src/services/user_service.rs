//! Domain service for admin user management.

use thiserror::Error;

use crate::db::{User, UserUpdate};

#[derive(Debug, Error)]
pub enum UserAdminError {
    #[error("User not found")]
    NotFound,

    #[error("Email already in use")]
    EmailTaken,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for UserAdminError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for UserAdminError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct UserPage {
    pub items: Vec<User>,
    pub total: u64,
}

#[async_trait::async_trait]
pub trait UserAdminService: Send + Sync {
    async fn list(&self, page: u64, limit: u64) -> Result<UserPage, UserAdminError>;

    /// Updates name/email/role. An email change is checked for uniqueness
    /// before it lands.
    async fn update(&self, id: i32, update: UserUpdate) -> Result<User, UserAdminError>;

    /// Deletes the account; the user's confessions survive with the owner
    /// column nulled by the schema.
    async fn delete(&self, id: i32) -> Result<(), UserAdminError>;
}

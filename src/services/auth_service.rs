//! Domain service for registration and login.
//!
//! Passwords are Argon2id-hashed off the async runtime; successful logins
//! are answered with a signed bearer token carrying the user's role.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::User;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("An account with this email already exists")]
    EmailTaken,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Registration input.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

/// Login result: the account plus a token for subsequent requests.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: User,
    pub token: String,
}

/// Claims carried by the bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// User id.
    pub sub: i32,
    /// `user` or `admin`.
    pub role: String,
    /// Expiry, seconds since epoch.
    pub exp: usize,
}

impl TokenClaims {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

/// Signs claims for `user` valid for `ttl_days`.
pub fn issue_token(secret: &str, user_id: i32, role: &str, ttl_days: i64) -> anyhow::Result<String> {
    use jsonwebtoken::{EncodingKey, Header, encode};

    let exp = chrono::Utc::now() + chrono::Duration::days(ttl_days);
    let claims = TokenClaims {
        sub: user_id,
        role: role.to_string(),
        exp: usize::try_from(exp.timestamp()).unwrap_or(usize::MAX),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| anyhow::anyhow!("Failed to sign token: {e}"))
}

/// Verifies a token and returns its claims, or `None` when invalid/expired.
#[must_use]
pub fn decode_token(secret: &str, token: &str) -> Option<TokenClaims> {
    use jsonwebtoken::{DecodingKey, Validation, decode};

    decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .ok()
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Creates an account with the `user` role.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] on mismatched confirmation or weak
    /// password, [`AuthError::EmailTaken`] on a duplicate email.
    async fn register(&self, registration: Registration) -> Result<User, AuthError>;

    /// Verifies credentials and issues a token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if login fails.
    async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_roundtrip() {
        let token = issue_token("test-secret", 42, "admin", 7).unwrap();
        let claims = decode_token("test-secret", &token).expect("token should decode");

        assert_eq!(claims.sub, 42);
        assert_eq!(claims.role, "admin");
        assert!(claims.is_admin());
    }

    #[test]
    fn test_token_rejects_wrong_secret() {
        let token = issue_token("test-secret", 1, "user", 7).unwrap();
        assert!(decode_token("other-secret", &token).is_none());
    }

    #[test]
    fn test_token_rejects_garbage() {
        assert!(decode_token("test-secret", "not-a-token").is_none());
    }
}

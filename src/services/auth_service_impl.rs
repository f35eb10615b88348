//! `SeaORM` implementation of the `AuthService` trait.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::task;
use tracing::info;

use crate::config::Config;
use crate::db::{Store, User, repositories::user::hash_password};
use crate::entities::users::UserRole;
use crate::services::auth_service::{
    AuthError, AuthService, LoginResult, Registration, issue_token,
};

pub struct SeaOrmAuthService {
    store: Store,
    config: Arc<RwLock<Config>>,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, config: Arc<RwLock<Config>>) -> Self {
        Self { store, config }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(&self, registration: Registration) -> Result<User, AuthError> {
        let Registration {
            name,
            email,
            password,
            password_confirmation,
        } = registration;

        if name.trim().is_empty() {
            return Err(AuthError::Validation("Name is required".to_string()));
        }
        if email.trim().is_empty() || !email.contains('@') {
            return Err(AuthError::Validation(
                "A valid email is required".to_string(),
            ));
        }
        if password.len() < 8 {
            return Err(AuthError::Validation(
                "Password must be at least 8 characters".to_string(),
            ));
        }
        if password != password_confirmation {
            return Err(AuthError::Validation(
                "Password and confirmation do not match".to_string(),
            ));
        }

        if self.store.get_user_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let security = self.config.read().await.security.clone();

        // Argon2 hashing is CPU-bound; keep it off the runtime threads.
        let hash = task::spawn_blocking(move || hash_password(&password, Some(&security)))
            .await
            .map_err(|e| AuthError::Internal(format!("Hashing task panicked: {e}")))??;

        let user = self
            .store
            .create_user(name.trim(), email.trim(), &hash, UserRole::User)
            .await?;

        info!("Registered new user {}", user.id);

        Ok(user)
    }

    async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AuthError> {
        let user = self
            .store
            .verify_user_password(email, password)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let (secret, ttl_days) = {
            let config = self.config.read().await;
            (
                config.security.jwt_secret.clone(),
                config.security.token_ttl_days,
            )
        };

        let role = match user.role {
            UserRole::Admin => "admin",
            UserRole::User => "user",
        };

        let token = issue_token(&secret, user.id, role, ttl_days)?;

        info!("User {} logged in", user.id);

        Ok(LoginResult { user, token })
    }
}

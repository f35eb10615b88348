//! `SeaORM` implementation of the `UserAdminService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::constants::limits;
use crate::db::{Store, User, UserUpdate};
use crate::services::user_service::{UserAdminError, UserAdminService, UserPage};

pub struct SeaOrmUserAdminService {
    store: Store,
}

impl SeaOrmUserAdminService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserAdminService for SeaOrmUserAdminService {
    async fn list(&self, page: u64, limit: u64) -> Result<UserPage, UserAdminError> {
        let page = page.max(1);
        let limit = limit.clamp(1, limits::MAX_PAGE_SIZE);

        let (items, total) = self.store.list_users(page, limit).await?;

        Ok(UserPage { items, total })
    }

    async fn update(&self, id: i32, update: UserUpdate) -> Result<User, UserAdminError> {
        let existing = self
            .store
            .get_user(id)
            .await?
            .ok_or(UserAdminError::NotFound)?;

        if let Some(email) = &update.email {
            if email.trim().is_empty() || !email.contains('@') {
                return Err(UserAdminError::Validation(
                    "A valid email is required".to_string(),
                ));
            }
            if *email != existing.email
                && self.store.get_user_by_email(email).await?.is_some()
            {
                return Err(UserAdminError::EmailTaken);
            }
        }

        let updated = self
            .store
            .update_user(id, &update)
            .await?
            .ok_or(UserAdminError::NotFound)?;

        info!("User {} updated", id);

        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<(), UserAdminError> {
        if self.store.get_user(id).await?.is_none() {
            return Err(UserAdminError::NotFound);
        }

        self.store.remove_user(id).await?;

        info!("User {} deleted", id);

        Ok(())
    }
}

//! `SeaORM` implementation of the `BadWordService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::db::{BadWord, Store};
use crate::services::bad_word_service::{BadWordError, BadWordService};

pub struct SeaOrmBadWordService {
    store: Store,
}

impl SeaOrmBadWordService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    fn normalize(word: &str) -> Result<String, BadWordError> {
        let word = word.trim().to_lowercase();
        if word.is_empty() {
            return Err(BadWordError::Validation("Word is required".to_string()));
        }
        Ok(word)
    }
}

#[async_trait]
impl BadWordService for SeaOrmBadWordService {
    async fn list(&self) -> Result<Vec<BadWord>, BadWordError> {
        Ok(self.store.list_bad_words().await?)
    }

    async fn add(&self, word: &str) -> Result<BadWord, BadWordError> {
        let word = Self::normalize(word)?;

        if self.store.get_bad_word_by_value(&word).await?.is_some() {
            return Err(BadWordError::AlreadyExists);
        }

        Ok(self.store.add_bad_word(&word).await?)
    }

    async fn update(&self, id: i32, new_word: &str) -> Result<(), BadWordError> {
        let new_word = Self::normalize(new_word)?;

        if self.store.get_bad_word(id).await?.is_none() {
            return Err(BadWordError::NotFound);
        }

        if let Some(existing) = self.store.get_bad_word_by_value(&new_word).await?
            && existing.id != id
        {
            return Err(BadWordError::AlreadyExists);
        }

        self.store.update_bad_word(id, &new_word).await?;

        info!("Bad word {} updated", id);

        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), BadWordError> {
        if self.store.get_bad_word(id).await?.is_none() {
            return Err(BadWordError::NotFound);
        }

        self.store.remove_bad_word(id).await?;

        info!("Bad word {} deleted", id);

        Ok(())
    }
}

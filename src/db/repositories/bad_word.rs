use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

use crate::entities::{bad_words, prelude::*};

pub struct BadWordRepository {
    conn: DatabaseConnection,
}

#[derive(Debug, Clone)]
pub struct BadWord {
    pub id: i32,
    pub word: String,
    pub created_at: String,
}

impl BadWordRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(m: bad_words::Model) -> BadWord {
        BadWord {
            id: m.id,
            word: m.word,
            created_at: m.created_at,
        }
    }

    pub async fn add(&self, word: &str) -> Result<BadWord> {
        let active = bad_words::ActiveModel {
            word: Set(word.to_string()),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert bad word")?;

        info!("Added bad word #{}", model.id);
        Ok(Self::map_model(model))
    }

    pub async fn get(&self, id: i32) -> Result<Option<BadWord>> {
        let model = BadWords::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query bad word by id")?;

        Ok(model.map(Self::map_model))
    }

    pub async fn get_by_word(&self, word: &str) -> Result<Option<BadWord>> {
        let model = BadWords::find()
            .filter(bad_words::Column::Word.eq(word))
            .one(&self.conn)
            .await
            .context("Failed to query bad word by value")?;

        Ok(model.map(Self::map_model))
    }

    pub async fn list_all(&self) -> Result<Vec<BadWord>> {
        let rows = BadWords::find()
            .order_by_asc(bad_words::Column::Word)
            .all(&self.conn)
            .await
            .context("Failed to list bad words")?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn update(&self, id: i32, new_word: &str) -> Result<bool> {
        let Some(model) = BadWords::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query bad word for update")?
        else {
            return Ok(false);
        };

        let mut active: bad_words::ActiveModel = model.into();
        active.word = Set(new_word.to_string());
        active
            .update(&self.conn)
            .await
            .context("Failed to update bad word")?;

        Ok(true)
    }

    pub async fn remove(&self, id: i32) -> Result<bool> {
        let result = BadWords::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete bad word")?;

        Ok(result.rows_affected > 0)
    }
}

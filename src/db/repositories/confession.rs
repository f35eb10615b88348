use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use sea_orm::sea_query::{Expr, ExprTrait};
use tracing::info;

use crate::entities::confessions::ConfessionStatus;
use crate::entities::{confessions, prelude::*};

/// Repository for confession rows and their moderation state
pub struct ConfessionRepository {
    conn: DatabaseConnection,
}

/// Confession data as the rest of the application sees it. The embedding is
/// decoded from its JSON column here so nothing above the repository touches
/// the storage encoding.
#[derive(Debug, Clone)]
pub struct Confession {
    pub id: i32,
    pub name: Option<String>,
    pub message: String,
    pub user_id: Option<i32>,
    pub likes: i32,
    pub dislikes: i32,
    pub created_at: String,
    pub ip_hash: Option<String>,
    pub status: ConfessionStatus,
    pub embedding: Option<Vec<f32>>,
}

/// Fields required to insert a new confession.
#[derive(Debug, Clone)]
pub struct NewConfession {
    pub name: Option<String>,
    pub message: String,
    pub user_id: Option<i32>,
    pub ip_hash: String,
    pub status: ConfessionStatus,
    pub embedding: Option<Vec<f32>>,
}

/// Filters shared by listing and CSV export.
#[derive(Debug, Clone, Default)]
pub struct ConfessionFilter {
    pub query: Option<String>,
    pub status: Option<ConfessionStatus>,
}

impl ConfessionRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(m: confessions::Model) -> Confession {
        let embedding = m
            .embedding
            .as_deref()
            .and_then(|raw| serde_json::from_str::<Vec<f32>>(raw).ok());

        Confession {
            id: m.id,
            name: m.name,
            message: m.message,
            user_id: m.user_id,
            likes: m.likes,
            dislikes: m.dislikes,
            created_at: m.created_at,
            ip_hash: m.ip_hash,
            status: m.status,
            embedding,
        }
    }

    fn filtered(filter: &ConfessionFilter) -> sea_orm::Select<Confessions> {
        let mut find = Confessions::find();

        if let Some(q) = filter.query.as_deref().filter(|q| !q.is_empty()) {
            find = find.filter(
                Condition::any()
                    .add(confessions::Column::Message.contains(q))
                    .add(confessions::Column::Name.contains(q)),
            );
        }

        if let Some(status) = filter.status {
            find = find.filter(confessions::Column::Status.eq(status));
        }

        find
    }

    pub async fn create(&self, data: &NewConfession) -> Result<Confession> {
        let embedding_json = data
            .embedding
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .context("Failed to encode embedding")?;

        let active = confessions::ActiveModel {
            name: Set(data.name.clone()),
            message: Set(data.message.clone()),
            user_id: Set(data.user_id),
            likes: Set(0),
            dislikes: Set(0),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ip_hash: Set(Some(data.ip_hash.clone())),
            status: Set(data.status),
            embedding: Set(embedding_json),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert confession")?;

        info!("Stored confession {} ({:?})", model.id, model.status);
        Ok(Self::map_model(model))
    }

    pub async fn get(&self, id: i32) -> Result<Option<Confession>> {
        let model = Confessions::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query confession by id")?;

        Ok(model.map(Self::map_model))
    }

    /// Newest-first page of confessions matching the filter, plus the total
    /// match count. `page` is 1-based.
    pub async fn find_all(
        &self,
        filter: &ConfessionFilter,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<Confession>, u64)> {
        let find = Self::filtered(filter);

        let total = find
            .clone()
            .count(&self.conn)
            .await
            .context("Failed to count confessions")?;

        let rows = find
            .order_by_desc(confessions::Column::CreatedAt)
            .order_by_desc(confessions::Column::Id)
            .offset(page.saturating_sub(1) * limit)
            .limit(limit)
            .all(&self.conn)
            .await
            .context("Failed to list confessions")?;

        Ok((rows.into_iter().map(Self::map_model).collect(), total))
    }

    /// Unpaginated newest-first listing for CSV export.
    pub async fn export(&self, filter: &ConfessionFilter) -> Result<Vec<Confession>> {
        let rows = Self::filtered(filter)
            .order_by_desc(confessions::Column::CreatedAt)
            .order_by_desc(confessions::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to export confessions")?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    /// Most recent non-rejected confessions that carry an embedding, newest
    /// first, capped at `window` rows. Candidates for duplicate detection.
    pub async fn recent_with_embeddings(&self, window: u64) -> Result<Vec<Confession>> {
        let rows = Confessions::find()
            .filter(confessions::Column::Embedding.is_not_null())
            .filter(confessions::Column::Status.ne(ConfessionStatus::Rejected))
            .order_by_desc(confessions::Column::Id)
            .limit(window)
            .all(&self.conn)
            .await
            .context("Failed to load embedding candidates")?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn set_status(
        &self,
        id: i32,
        status: ConfessionStatus,
    ) -> Result<Option<Confession>> {
        let Some(model) = Confessions::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query confession for status update")?
        else {
            return Ok(None);
        };

        let mut active: confessions::ActiveModel = model.into();
        active.status = Set(status);
        let updated = active
            .update(&self.conn)
            .await
            .context("Failed to update confession status")?;

        Ok(Some(Self::map_model(updated)))
    }

    /// Atomically bumps the like or dislike counter.
    pub async fn increment_counter(&self, id: i32, value: i32) -> Result<()> {
        let column = if value > 0 {
            confessions::Column::Likes
        } else {
            confessions::Column::Dislikes
        };

        Confessions::update_many()
            .col_expr(column, Expr::col(column).add(1))
            .filter(confessions::Column::Id.eq(id))
            .exec(&self.conn)
            .await
            .context("Failed to increment vote counter")?;

        Ok(())
    }

    pub async fn remove(&self, id: i32) -> Result<bool> {
        let result = Confessions::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete confession")?;

        Ok(result.rows_affected > 0)
    }
}

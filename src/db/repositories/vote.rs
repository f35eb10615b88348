use anyhow::{Context, Result};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set};

use crate::entities::{prelude::*, votes};

pub struct VoteRepository {
    conn: DatabaseConnection,
}

#[derive(Debug, Clone)]
pub struct Vote {
    pub id: i32,
    pub confession_id: i32,
    pub ip_hash: String,
    pub value: i32,
    pub created_at: String,
}

impl VoteRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(m: votes::Model) -> Vote {
        Vote {
            id: m.id,
            confession_id: m.confession_id,
            ip_hash: m.ip_hash,
            value: m.value,
            created_at: m.created_at,
        }
    }

    pub async fn find_by_confession_and_ip(
        &self,
        confession_id: i32,
        ip_hash: &str,
    ) -> Result<Option<Vote>> {
        let vote = Votes::find()
            .filter(votes::Column::ConfessionId.eq(confession_id))
            .filter(votes::Column::IpHash.eq(ip_hash))
            .one(&self.conn)
            .await
            .context("Failed to query existing vote")?;

        Ok(vote.map(Self::map_model))
    }

    /// Records a vote. Returns `false` when a vote from this hash already
    /// exists for the confession; the unique index makes this race-safe.
    pub async fn create(&self, confession_id: i32, ip_hash: &str, value: i32) -> Result<bool> {
        let active = votes::ActiveModel {
            confession_id: Set(confession_id),
            ip_hash: Set(ip_hash.to_string()),
            value: Set(value),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let result = Votes::insert(active)
            .on_conflict(
                OnConflict::columns([votes::Column::ConfessionId, votes::Column::IpHash])
                    .do_nothing()
                    .to_owned(),
            )
            .exec(&self.conn)
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(DbErr::RecordNotInserted) => Ok(false),
            Err(e) => Err(e).context("Failed to insert vote"),
        }
    }
}

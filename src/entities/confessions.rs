use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Moderation state of a confession. Stored as the uppercase string the
/// frontend filters on.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "UPPERCASE")]
pub enum ConfessionStatus {
    #[sea_orm(string_value = "APPROVED")]
    Approved,
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "REJECTED")]
    Rejected,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "confessions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Optional display name chosen by the submitter.
    pub name: Option<String>,

    #[sea_orm(column_type = "Text")]
    pub message: String,

    /// Set when the submitter was logged in. Nulled when the account is deleted.
    pub user_id: Option<i32>,

    pub likes: i32,

    pub dislikes: i32,

    pub created_at: String,

    /// Truncated SHA-256 of the submitter address (16 hex chars).
    pub ip_hash: Option<String>,

    pub status: ConfessionStatus,

    /// JSON-encoded embedding vector used for near-duplicate detection.
    #[sea_orm(column_type = "Text", nullable)]
    pub embedding: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "SetNull"
    )]
    User,
    #[sea_orm(has_many = "super::votes::Entity")]
    Votes,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::votes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Votes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

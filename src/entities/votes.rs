use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "votes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub confession_id: i32,

    /// Same truncated hash as on confessions; one vote per (confession, hash).
    pub ip_hash: String,

    /// +1 for a like, -1 for a dislike.
    pub value: i32,

    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::confessions::Entity",
        from = "Column::ConfessionId",
        to = "super::confessions::Column::Id",
        on_delete = "Cascade"
    )]
    Confession,
}

impl Related<super::confessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Confession.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

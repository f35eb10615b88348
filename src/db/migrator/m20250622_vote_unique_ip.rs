use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// The existence check in the vote service only holds for serial requests.
/// This index makes the one-vote-per-(confession, hash) invariant hold
/// under concurrent submissions from the same address too.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_votes_confession_ip")
                    .table(Votes::Table)
                    .col(Votes::ConfessionId)
                    .col(Votes::IpHash)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_confessions_status_created")
                    .table(Confessions::Table)
                    .col(Confessions::Status)
                    .col(Confessions::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_confessions_status_created")
                    .table(Confessions::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_votes_confession_ip")
                    .table(Votes::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Votes {
    Table,
    ConfessionId,
    IpHash,
}

#[derive(DeriveIden)]
enum Confessions {
    Table,
    Status,
    CreatedAt,
}

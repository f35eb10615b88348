use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let result = manager
            .alter_table(
                Table::alter()
                    .table(Confessions::Table)
                    .add_column(ColumnDef::new(Confessions::Embedding).text().null())
                    .to_owned(),
            )
            .await;

        match result {
            Ok(()) => Ok(()),
            Err(e) => {
                // Databases created after the entity gained the column
                // already have it via the initial migration.
                let msg = e.to_string();
                if msg.contains("duplicate column") {
                    return Ok(());
                }
                Err(e)
            }
        }
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Confessions::Table)
                    .drop_column(Confessions::Embedding)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Confessions {
    Table,
    Embedding,
}

use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Words the original deployment shipped with so a fresh install moderates
/// out of the box. Admins manage the real list over the API.
const DEFAULT_BAD_WORDS: &[&str] = &["bangsat", "anjing", "goblok"];

const DEFAULT_ADMIN_EMAIL: &str = "admin@bisik.local";

/// Hash the default admin password using Argon2id
fn hash_default_password() -> String {
    use argon2::{
        Argon2,
        password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
    };

    let password = b"password";
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password, &salt)
        .expect("Failed to hash default password")
        .to_string()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        manager
            .create_table(
                schema
                    .create_table_from_entity(Users)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Confessions)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Votes)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(BadWords)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Seed default admin account with hashed password
        let now = chrono::Utc::now().to_rfc3339();
        let password_hash = hash_default_password();

        let insert = sea_orm_migration::sea_query::Query::insert()
            .into_table(Users)
            .columns([
                crate::entities::users::Column::Name,
                crate::entities::users::Column::Email,
                crate::entities::users::Column::PasswordHash,
                crate::entities::users::Column::Role,
                crate::entities::users::Column::CreatedAt,
            ])
            .values_panic([
                "admin".into(),
                DEFAULT_ADMIN_EMAIL.into(),
                password_hash.into(),
                "admin".into(),
                now.clone().into(),
            ])
            .to_owned();

        manager.exec_stmt(insert).await?;

        // Seed the starter denylist
        for word in DEFAULT_BAD_WORDS {
            let insert = sea_orm_migration::sea_query::Query::insert()
                .into_table(BadWords)
                .columns([
                    crate::entities::bad_words::Column::Word,
                    crate::entities::bad_words::Column::CreatedAt,
                ])
                .values_panic([(*word).into(), now.clone().into()])
                .to_owned();

            manager.exec_stmt(insert).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BadWords).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Votes).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Confessions).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users).to_owned())
            .await?;

        Ok(())
    }
}

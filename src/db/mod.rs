use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::SecurityConfig;
use crate::entities::confessions::ConfessionStatus;
use crate::entities::users::UserRole;

pub mod migrator;
pub mod repositories;

pub use repositories::bad_word::BadWord;
pub use repositories::confession::{Confession, ConfessionFilter, NewConfession};
pub use repositories::user::{User, UserUpdate};
pub use repositories::vote::Vote;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.starts_with(":memory:") && !db_url.contains("::memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn confession_repo(&self) -> repositories::confession::ConfessionRepository {
        repositories::confession::ConfessionRepository::new(self.conn.clone())
    }

    fn vote_repo(&self) -> repositories::vote::VoteRepository {
        repositories::vote::VoteRepository::new(self.conn.clone())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn bad_word_repo(&self) -> repositories::bad_word::BadWordRepository {
        repositories::bad_word::BadWordRepository::new(self.conn.clone())
    }

    // ========== Confessions ==========

    pub async fn create_confession(&self, data: &NewConfession) -> Result<Confession> {
        self.confession_repo().create(data).await
    }

    pub async fn get_confession(&self, id: i32) -> Result<Option<Confession>> {
        self.confession_repo().get(id).await
    }

    pub async fn list_confessions(
        &self,
        filter: &ConfessionFilter,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<Confession>, u64)> {
        self.confession_repo().find_all(filter, page, limit).await
    }

    pub async fn export_confessions(&self, filter: &ConfessionFilter) -> Result<Vec<Confession>> {
        self.confession_repo().export(filter).await
    }

    pub async fn recent_confessions_with_embeddings(
        &self,
        window: u64,
    ) -> Result<Vec<Confession>> {
        self.confession_repo().recent_with_embeddings(window).await
    }

    pub async fn set_confession_status(
        &self,
        id: i32,
        status: ConfessionStatus,
    ) -> Result<Option<Confession>> {
        self.confession_repo().set_status(id, status).await
    }

    pub async fn increment_confession_counter(&self, id: i32, value: i32) -> Result<()> {
        self.confession_repo().increment_counter(id, value).await
    }

    pub async fn remove_confession(&self, id: i32) -> Result<bool> {
        self.confession_repo().remove(id).await
    }

    // ========== Votes ==========

    pub async fn find_vote(&self, confession_id: i32, ip_hash: &str) -> Result<Option<Vote>> {
        self.vote_repo()
            .find_by_confession_and_ip(confession_id, ip_hash)
            .await
    }

    pub async fn record_vote(
        &self,
        confession_id: i32,
        ip_hash: &str,
        value: i32,
    ) -> Result<bool> {
        self.vote_repo().create(confession_id, ip_hash, value).await
    }

    // ========== Users ==========

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.user_repo().get_by_email(email).await
    }

    pub async fn get_user(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        role: UserRole,
    ) -> Result<User> {
        self.user_repo()
            .create(name, email, password_hash, role)
            .await
    }

    pub async fn list_users(&self, page: u64, limit: u64) -> Result<(Vec<User>, u64)> {
        self.user_repo().find_all(page, limit).await
    }

    pub async fn update_user(&self, id: i32, update: &UserUpdate) -> Result<Option<User>> {
        self.user_repo().update(id, update).await
    }

    pub async fn remove_user(&self, id: i32) -> Result<bool> {
        self.user_repo().remove(id).await
    }

    pub async fn verify_user_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>> {
        self.user_repo().verify_password(email, password).await
    }

    pub async fn update_user_password(
        &self,
        id: i32,
        new_password: &str,
        config: &SecurityConfig,
    ) -> Result<()> {
        self.user_repo()
            .update_password(id, new_password, config)
            .await
    }

    // ========== Bad words ==========

    pub async fn add_bad_word(&self, word: &str) -> Result<BadWord> {
        self.bad_word_repo().add(word).await
    }

    pub async fn get_bad_word(&self, id: i32) -> Result<Option<BadWord>> {
        self.bad_word_repo().get(id).await
    }

    pub async fn get_bad_word_by_value(&self, word: &str) -> Result<Option<BadWord>> {
        self.bad_word_repo().get_by_word(word).await
    }

    pub async fn list_bad_words(&self) -> Result<Vec<BadWord>> {
        self.bad_word_repo().list_all().await
    }

    pub async fn update_bad_word(&self, id: i32, new_word: &str) -> Result<bool> {
        self.bad_word_repo().update(id, new_word).await
    }

    pub async fn remove_bad_word(&self, id: i32) -> Result<bool> {
        self.bad_word_repo().remove(id).await
    }
}

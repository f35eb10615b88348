//! `SeaORM` implementation of the `ConfessionService` trait.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{RwLock, broadcast};
use tracing::{info, warn};

use crate::api::types::ConfessionDto;
use crate::clients::embedding::EmbeddingClient;
use crate::config::Config;
use crate::constants::limits;
use crate::db::{Confession, ConfessionFilter, NewConfession, Store};
use crate::domain::events::WallEvent;
use crate::entities::confessions::ConfessionStatus;
use crate::services::confession_service::{
    ConfessionError, ConfessionPage, ConfessionService, ConfessionSubmission,
};
use crate::services::moderation;

pub struct SeaOrmConfessionService {
    store: Store,
    embedding: Option<Arc<EmbeddingClient>>,
    config: Arc<RwLock<Config>>,
    event_bus: broadcast::Sender<WallEvent>,
}

impl SeaOrmConfessionService {
    #[must_use]
    pub const fn new(
        store: Store,
        embedding: Option<Arc<EmbeddingClient>>,
        config: Arc<RwLock<Config>>,
        event_bus: broadcast::Sender<WallEvent>,
    ) -> Self {
        Self {
            store,
            embedding,
            config,
            event_bus,
        }
    }

    fn notify(&self, event: WallEvent) {
        // Nobody connected is fine; the wall catches up on next load.
        let _ = self.event_bus.send(event);
    }

    /// Fetches an embedding for the message and scans recent confessions for
    /// a near-duplicate. Failures from the model endpoint degrade to "no
    /// embedding" rather than blocking submission.
    async fn check_duplicate(&self, message: &str) -> Result<Option<Vec<f32>>, ConfessionError> {
        let Some(client) = &self.embedding else {
            return Ok(None);
        };

        let (threshold, window) = {
            let config = self.config.read().await;
            (
                config.moderation.similarity_threshold,
                config.moderation.duplicate_scan_window,
            )
        };

        let vector = match client.embed(message).await {
            Ok(v) => v,
            Err(e) => {
                warn!("Embedding lookup failed, skipping duplicate check: {e}");
                return Ok(None);
            }
        };

        let candidates = self.store.recent_confessions_with_embeddings(window).await?;

        for candidate in &candidates {
            if let Some(existing) = &candidate.embedding {
                let score = moderation::cosine_similarity(&vector, existing);
                if score >= threshold {
                    info!(
                        "Near-duplicate of confession {} (score {:.3})",
                        candidate.id, score
                    );
                    return Err(ConfessionError::DuplicateContent);
                }
            }
        }

        Ok(Some(vector))
    }
}

#[async_trait]
impl ConfessionService for SeaOrmConfessionService {
    async fn create(
        &self,
        submission: ConfessionSubmission,
    ) -> Result<Confession, ConfessionError> {
        if submission.message.chars().count() < limits::MIN_MESSAGE_LEN {
            return Err(ConfessionError::Validation("Message too short".to_string()));
        }

        let denylist: Vec<String> = self
            .store
            .list_bad_words()
            .await?
            .into_iter()
            .map(|w| w.word)
            .collect();

        if moderation::find_prohibited_word(&submission.message, &denylist).is_some() {
            return Err(ConfessionError::ProhibitedWords);
        }

        let status = if moderation::contains_link(&submission.message) {
            ConfessionStatus::Pending
        } else {
            ConfessionStatus::Approved
        };

        let embedding = self.check_duplicate(&submission.message).await?;

        let confession = self
            .store
            .create_confession(&NewConfession {
                name: submission.name.filter(|n| !n.is_empty()),
                message: submission.message,
                user_id: submission.user_id,
                ip_hash: submission.ip_hash,
                status,
                embedding,
            })
            .await?;

        self.notify(WallEvent::Created(ConfessionDto::from(confession.clone())));

        Ok(confession)
    }

    async fn list(
        &self,
        filter: ConfessionFilter,
        page: u64,
        limit: u64,
    ) -> Result<ConfessionPage, ConfessionError> {
        let page = page.max(1);
        let limit = limit.clamp(1, limits::MAX_PAGE_SIZE);

        let (items, total) = self.store.list_confessions(&filter, page, limit).await?;

        Ok(ConfessionPage {
            items,
            total,
            page,
            limit,
        })
    }

    async fn vote(
        &self,
        confession_id: i32,
        value: i32,
        ip_hash: &str,
    ) -> Result<Confession, ConfessionError> {
        if value != 1 && value != -1 {
            return Err(ConfessionError::Validation("Invalid value".to_string()));
        }

        if self.store.get_confession(confession_id).await?.is_none() {
            return Err(ConfessionError::NotFound);
        }

        if self.store.find_vote(confession_id, ip_hash).await?.is_some() {
            return Err(ConfessionError::AlreadyVoted);
        }

        // The unique index closes the race the existence check leaves open.
        let inserted = self.store.record_vote(confession_id, ip_hash, value).await?;
        if !inserted {
            return Err(ConfessionError::AlreadyVoted);
        }

        self.store
            .increment_confession_counter(confession_id, value)
            .await?;

        let updated = self
            .store
            .get_confession(confession_id)
            .await?
            .ok_or(ConfessionError::NotFound)?;

        self.notify(WallEvent::Voted(ConfessionDto::from(updated.clone())));

        Ok(updated)
    }

    async fn approve(&self, id: i32) -> Result<Confession, ConfessionError> {
        let confession = self
            .store
            .set_confession_status(id, ConfessionStatus::Approved)
            .await?
            .ok_or(ConfessionError::NotFound)?;

        info!("Confession {} approved", id);
        self.notify(WallEvent::Approved(ConfessionDto::from(confession.clone())));

        Ok(confession)
    }

    async fn reject(&self, id: i32) -> Result<Confession, ConfessionError> {
        let confession = self
            .store
            .set_confession_status(id, ConfessionStatus::Rejected)
            .await?
            .ok_or(ConfessionError::NotFound)?;

        info!("Confession {} rejected", id);

        Ok(confession)
    }

    async fn delete(&self, id: i32) -> Result<(), ConfessionError> {
        if self.store.get_confession(id).await?.is_none() {
            return Err(ConfessionError::NotFound);
        }

        self.store.remove_confession(id).await?;

        info!("Confession {} deleted", id);
        self.notify(WallEvent::Deleted { id });

        Ok(())
    }

    async fn export(
        &self,
        filter: ConfessionFilter,
    ) -> Result<Vec<Confession>, ConfessionError> {
        Ok(self.store.export_confessions(&filter).await?)
    }
}

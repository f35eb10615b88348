use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};

use crate::clients::embedding::EmbeddingClient;
use crate::config::Config;
use crate::db::Store;
use crate::domain::events::WallEvent;
use crate::services::{
    AuthService, BadWordService, ConfessionService, SeaOrmAuthService, SeaOrmBadWordService,
    SeaOrmConfessionService, SeaOrmUserAdminService, UserAdminService,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub embedding: Option<Arc<EmbeddingClient>>,

    pub confession_service: Arc<dyn ConfessionService>,

    pub auth_service: Arc<dyn AuthService>,

    pub user_service: Arc<dyn UserAdminService>,

    pub bad_word_service: Arc<dyn BadWordService>,

    pub event_bus: broadcast::Sender<WallEvent>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let (event_bus, _) = broadcast::channel(config.general.event_bus_buffer_size);
        Self::with_event_bus(config, event_bus).await
    }

    pub async fn with_event_bus(
        config: Config,
        event_bus: broadcast::Sender<WallEvent>,
    ) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let embedding = if config.embedding.enabled {
            Some(Arc::new(EmbeddingClient::new(&config.embedding)?))
        } else {
            None
        };

        let config_arc = Arc::new(RwLock::new(config));

        let confession_service = Arc::new(SeaOrmConfessionService::new(
            store.clone(),
            embedding.clone(),
            config_arc.clone(),
            event_bus.clone(),
        )) as Arc<dyn ConfessionService>;

        let auth_service = Arc::new(SeaOrmAuthService::new(store.clone(), config_arc.clone()))
            as Arc<dyn AuthService>;

        let user_service =
            Arc::new(SeaOrmUserAdminService::new(store.clone())) as Arc<dyn UserAdminService>;

        let bad_word_service =
            Arc::new(SeaOrmBadWordService::new(store.clone())) as Arc<dyn BadWordService>;

        Ok(Self {
            config: config_arc,
            store,
            embedding,
            confession_service,
            auth_service,
            user_service,
            bad_word_service,
            event_bus,
        })
    }

    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }
}

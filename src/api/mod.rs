use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::state::SharedState;

pub mod auth;
mod bad_words;
mod confessions;
mod error;
pub mod events;
mod moderation;
mod observability;
mod assets;
pub mod types;
mod users;
mod validation;

pub use error::ApiError;
pub use types::ApiResponse;

use crate::domain::events::WallEvent;
use crate::services::{AuthService, BadWordService, ConfessionService, UserAdminService};
use axum::Json;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<RwLock<Config>> {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn event_bus(&self) -> &tokio::sync::broadcast::Sender<WallEvent> {
        &self.shared.event_bus
    }

    #[must_use]
    pub fn confession_service(&self) -> &Arc<dyn ConfessionService> {
        &self.shared.confession_service
    }

    #[must_use]
    pub fn auth_service(&self) -> &Arc<dyn AuthService> {
        &self.shared.auth_service
    }

    #[must_use]
    pub fn user_service(&self) -> &Arc<dyn UserAdminService> {
        &self.shared.user_service
    }

    #[must_use]
    pub fn bad_word_service(&self) -> &Arc<dyn BadWordService> {
        &self.shared.bad_word_service
    }
}

pub async fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    Ok(Arc::new(AppState {
        shared,
        prometheus_handle,
    }))
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    create_app_state(shared, prometheus_handle).await
}

#[derive(Serialize)]
struct HealthDto {
    ok: bool,
}

async fn health() -> Json<HealthDto> {
    Json(HealthDto { ok: true })
}

pub async fn router(state: Arc<AppState>) -> Router {
    let cors_origins = {
        let config = state.config().read().await;
        config.server.cors_allowed_origins.clone()
    };

    let admin_routes = Router::new()
        .route("/verify", get(moderation::verify))
        .route("/confessions/export.csv", get(moderation::export_csv))
        .route("/confessions/{id}/approve", post(moderation::approve))
        .route("/confessions/{id}/reject", post(moderation::reject))
        .route("/confessions/{id}", delete(moderation::remove))
        .route("/bad-words", get(bad_words::list))
        .route("/bad-words", post(bad_words::add))
        .route("/bad-words/{id}", put(bad_words::update))
        .route("/bad-words/{id}", delete(bad_words::remove))
        .route("/users", get(users::list))
        .route("/users/{id}", put(users::update))
        .route("/users/{id}", delete(users::remove))
        .route("/metrics", get(observability::get_metrics))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_admin,
        ));

    let api_router = Router::new()
        .route("/confessions", get(confessions::list))
        .route("/confessions", post(confessions::create))
        .route("/confessions/{id}/vote", post(confessions::vote))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .nest("/admin", admin_routes);

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .route("/health", get(health))
        .route("/ws", get(events::ws_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::enrich_auth,
        ))
        .fallback(assets::serve_asset)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::track_requests))
        .with_state(state)
}

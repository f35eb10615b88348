//! Regression tests for the real-time layer and the duplicate-detection
//! storage path.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use bisik::api::AppState;
use bisik::config::Config;
use bisik::db::{ConfessionFilter, NewConfession, Store};
use bisik::domain::events::WallEvent;
use bisik::entities::confessions::ConfessionStatus;
use bisik::services::moderation::cosine_similarity;
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

async fn spawn_app() -> (Router, Arc<AppState>) {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.general.max_db_connections = 1;

    let state = bisik::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    let router = bisik::api::router(state.clone()).await;
    (router, state)
}

async fn spawn_store() -> Store {
    let (_, state) = spawn_app().await;
    state.store().clone()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn admin_token_for(state: &Arc<AppState>) -> String {
    // Config is behind an async lock; tests grab the secret via try_read
    // since nothing else holds it.
    let config = state.config().try_read().expect("config lock free").clone();
    bisik::services::auth_service::issue_token(&config.security.jwt_secret, 1, "admin", 1)
        .expect("token")
}

#[tokio::test]
async fn wall_events_reach_subscribers() {
    let (app, state) = spawn_app().await;
    let mut rx = state.event_bus().subscribe();
    let auth = format!("Bearer {}", admin_token_for(&state));

    // Created
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/confessions")
                .header("Content-Type", "application/json")
                .body(Body::from(r#"{"message":"event bus check"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    match rx.try_recv().expect("created event") {
        WallEvent::Created(dto) => assert_eq!(i64::from(dto.id), id),
        other => panic!("expected Created, got {other:?}"),
    }

    // Voted
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/confessions/{id}/vote"))
                .header("Content-Type", "application/json")
                .body(Body::from(r#"{"value":1}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    match rx.try_recv().expect("voted event") {
        WallEvent::Voted(dto) => {
            assert_eq!(i64::from(dto.id), id);
            assert_eq!(dto.likes, 1);
        }
        other => panic!("expected Voted, got {other:?}"),
    }

    // Approved
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/admin/confessions/{id}/approve"))
                .header("Authorization", &auth)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    assert!(matches!(
        rx.try_recv().expect("approved event"),
        WallEvent::Approved(_)
    ));

    // Rejections are intentionally silent
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/admin/confessions/{id}/reject"))
                .header("Authorization", &auth)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(rx.try_recv().is_err());

    // Deleted
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/admin/confessions/{id}"))
                .header("Authorization", &auth)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    match rx.try_recv().expect("deleted event") {
        WallEvent::Deleted { id: deleted } => assert_eq!(i64::from(deleted), id),
        other => panic!("expected Deleted, got {other:?}"),
    }
}

#[test]
fn wall_event_wire_format_matches_clients() {
    let event = WallEvent::Deleted { id: 7 };
    let json = serde_json::to_value(&event).unwrap();

    assert_eq!(json["type"], "deleted");
    assert_eq!(json["item"]["id"], 7);
}

fn unit_vector(dim: usize, hot: usize) -> Vec<f32> {
    let mut v = vec![0.0; dim];
    v[hot] = 1.0;
    v
}

#[tokio::test]
async fn embeddings_survive_storage_roundtrip() {
    let store = spawn_store().await;

    let stored = store
        .create_confession(&NewConfession {
            name: None,
            message: "first secret".to_string(),
            user_id: None,
            ip_hash: "aaaa111122223333".to_string(),
            status: ConfessionStatus::Approved,
            embedding: Some(unit_vector(384, 0)),
        })
        .await
        .expect("create with embedding");

    assert!(stored.embedding.is_some());

    let candidates = store
        .recent_confessions_with_embeddings(256)
        .await
        .expect("candidates");
    assert_eq!(candidates.len(), 1);

    let roundtripped = candidates[0].embedding.as_ref().unwrap();
    assert_eq!(roundtripped.len(), 384);
    assert!((cosine_similarity(roundtripped, &unit_vector(384, 0)) - 1.0).abs() < 1e-6);
    assert!(cosine_similarity(roundtripped, &unit_vector(384, 1)).abs() < 1e-6);
}

#[tokio::test]
async fn rejected_confessions_leave_the_duplicate_scan() {
    let store = spawn_store().await;

    let stored = store
        .create_confession(&NewConfession {
            name: None,
            message: "soon rejected".to_string(),
            user_id: None,
            ip_hash: "bbbb111122223333".to_string(),
            status: ConfessionStatus::Approved,
            embedding: Some(unit_vector(384, 2)),
        })
        .await
        .expect("create");

    assert_eq!(
        store
            .recent_confessions_with_embeddings(256)
            .await
            .unwrap()
            .len(),
        1
    );

    store
        .set_confession_status(stored.id, ConfessionStatus::Rejected)
        .await
        .expect("reject");

    assert!(
        store
            .recent_confessions_with_embeddings(256)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn deleting_a_confession_cascades_votes() {
    let store = spawn_store().await;

    let stored = store
        .create_confession(&NewConfession {
            name: None,
            message: "cascade target".to_string(),
            user_id: None,
            ip_hash: "cccc111122223333".to_string(),
            status: ConfessionStatus::Approved,
            embedding: None,
        })
        .await
        .expect("create");

    assert!(
        store
            .record_vote(stored.id, "dddd111122223333", 1)
            .await
            .expect("vote")
    );

    // Second insert from the same hash is refused by the unique index even
    // without the service-level existence check.
    assert!(
        !store
            .record_vote(stored.id, "dddd111122223333", -1)
            .await
            .expect("duplicate vote")
    );

    assert!(store.remove_confession(stored.id).await.expect("delete"));

    assert!(
        store
            .find_vote(stored.id, "dddd111122223333")
            .await
            .expect("vote lookup")
            .is_none()
    );
}

#[tokio::test]
async fn export_respects_filters() {
    let store = spawn_store().await;

    for (message, status) in [
        ("approved apple", ConfessionStatus::Approved),
        ("pending pear", ConfessionStatus::Pending),
    ] {
        store
            .create_confession(&NewConfession {
                name: None,
                message: message.to_string(),
                user_id: None,
                ip_hash: "eeee111122223333".to_string(),
                status,
                embedding: None,
            })
            .await
            .expect("create");
    }

    let all = store
        .export_confessions(&ConfessionFilter::default())
        .await
        .expect("export all");
    assert_eq!(all.len(), 2);

    let pending = store
        .export_confessions(&ConfessionFilter {
            query: None,
            status: Some(ConfessionStatus::Pending),
        })
        .await
        .expect("export pending");
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].message, "pending pear");

    let searched = store
        .export_confessions(&ConfessionFilter {
            query: Some("apple".to_string()),
            status: None,
        })
        .await
        .expect("export searched");
    assert_eq!(searched.len(), 1);
}

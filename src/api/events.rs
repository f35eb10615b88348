//! WebSocket endpoint pushing wall events to connected browsers.

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::api::AppState;
use crate::domain::events::WallEvent;

/// GET /ws
pub async fn ws_handler(State(state): State<Arc<AppState>>, ws: WebSocketUpgrade) -> Response {
    let rx = state.event_bus().subscribe();
    ws.on_upgrade(move |socket| handle_socket(socket, rx))
}

async fn handle_socket(mut socket: WebSocket, mut rx: broadcast::Receiver<WallEvent>) {
    debug!("WebSocket connection opened");

    loop {
        tokio::select! {
            event = rx.recv() => match event {
                Ok(event) => {
                    let Ok(json) = serde_json::to_string(&event) else {
                        continue;
                    };
                    if socket.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    warn!("WebSocket client lagged by {} events", count);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            inbound = socket.recv() => match inbound {
                // No inbound protocol; clients only listen.
                Some(Ok(_)) => {}
                _ => break,
            },
        }
    }

    debug!("WebSocket connection closed");
}

//! Domain events for the application.
//!
//! These events are sent via the event bus to every browser connected to the
//! wall, so the list updates without polling.

use serde::Serialize;

use crate::api::types::ConfessionDto;

/// Events pushed to connected clients over the WebSocket endpoint.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", content = "item", rename_all = "lowercase")]
pub enum WallEvent {
    /// A confession was submitted (may still be pending review).
    Created(ConfessionDto),

    /// A confession's counters changed.
    Voted(ConfessionDto),

    /// An admin approved a pending confession.
    Approved(ConfessionDto),

    /// An admin removed a confession.
    Deleted { id: i32 },
}

//! Application state shared across all request handlers.

use sqlx::PgPool;
use teamforge_core::events::RealtimeEventSender;

/// Application state that is shared across all request handlers.
///
/// This is cloneable and cheap to pass around.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: PgPool,
    /// Sending half of the real-time event channel. WebSocket handlers
    /// subscribe to it; the formation pass publishes through it.
    pub events: RealtimeEventSender,
}

impl AppState {
    pub fn new(db: PgPool, events: RealtimeEventSender) -> Self {
        Self { db, events }
    }
}

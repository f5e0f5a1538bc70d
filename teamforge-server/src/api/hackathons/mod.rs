//! Hackathon API handlers.
//!
//! # Endpoints
//!
//! - `GET /hackathons/{hackathon_id}/ws` – WebSocket stream of real-time events

use axum::{Router, http::StatusCode, response::IntoResponse, routing::get};

use crate::state::AppState;

mod ws;

/// Build the Hackathon API router.
pub fn router() -> Router<AppState> {
    Router::new().route("/hackathons/{hackathon_id}/ws", get(ws::hackathon_events_ws))
}

/// Errors that can occur in Hackathon API handlers.
#[derive(Debug)]
enum HackathonApiError {
    /// A database query failed.
    Database(sqlx::Error),
    /// The requested hackathon was not found.
    NotFound,
}

impl IntoResponse for HackathonApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            HackathonApiError::Database(e) => {
                tracing::error!(error = %e, "Hackathon API database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
            HackathonApiError::NotFound => {
                (StatusCode::NOT_FOUND, "hackathon not found").into_response()
            }
        }
    }
}

//! WebSocket message types for the hackathon event stream.
//!
//! The `GET /hackathons/{hackathon_id}/ws` endpoint upgrades to a WebSocket
//! connection and pushes [`WsServerMessage`] JSON frames.
//!
//! # Protocol
//!
//! 1. After the upgrade the server stays silent until an event for the
//!    hackathon is published.
//! 2. Every `teams-formed` event for the hackathon is forwarded as a
//!    [`WsServerMessage::TeamsFormed`] frame.
//! 3. If the server falls behind the event stream it sends a
//!    [`WsServerMessage::Error`] with [`WsCloseCode::LAGGED`] and keeps the
//!    connection open.

use serde::{Deserialize, Serialize};

use super::events::TeamsFormedPayload;

/// Server-to-client WebSocket message.
///
/// Serialized as an internally-tagged JSON object so the client can
/// dispatch on the `"type"` field:
///
/// ```json
/// {"type":"teams_formed","hackathon_id":"…","teams":[ ... ]}
/// {"type":"error","code":4008,"reason":"missed events"}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsServerMessage {
    TeamsFormed(TeamsFormedPayload),

    Error {
        /// Application-level error code (mirrors [`WsCloseCode`] values
        /// where applicable).
        code: u16,
        reason: String,
    },
}

/// Well-known WebSocket codes used by the hackathon event stream.
///
/// Codes in the 4000–4999 range are reserved for application use by
/// [RFC 6455 §7.4.2](https://www.rfc-editor.org/rfc/rfc6455#section-7.4.2).
pub struct WsCloseCode;

impl WsCloseCode {
    pub const NORMAL: u16 = 1000;

    pub const INTERNAL_ERROR: u16 = 1011;

    /// The subscriber missed events because it could not keep up.
    pub const LAGGED: u16 = 4008;
}

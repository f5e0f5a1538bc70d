//! Wire objects for teamforge.
//!
//! Everything here is plain serde data shared between the server and its
//! clients: team snapshots, the `teams-formed` real-time event and the
//! WebSocket frames that carry it.

pub mod objects;

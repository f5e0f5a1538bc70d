//! Runtime configuration types.
//!
//! Scheduler and mail settings are defined in `teamforge-core::config`.
//! This module re-exports them next to the server-only settings.

use std::net::SocketAddr;

pub use teamforge_core::config::{MailConfig, SchedulerConfig, SmtpConfig};

/// Validated server settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub listen: SocketAddr,
}

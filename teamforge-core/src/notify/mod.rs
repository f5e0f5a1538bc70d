//! Notification senders for team assignment notices.
//!
//! - `SmtpMailer`: delivers notices over SMTP (STARTTLS relay)
//! - `LogMailer`: writes notices to the log, for deployments without mail

pub mod log;
pub mod smtp;

pub use log::LogMailer;
pub use smtp::SmtpMailer;

use async_trait::async_trait;
use std::sync::Arc;
use teamforge_sdk::objects::TeamAssignmentNotice;
use thiserror::Error;

use crate::config::MailConfig;

/// Errors that can occur while delivering a notice.
#[derive(Debug, Error)]
pub enum MailError {
    /// A sender or recipient address could not be parsed
    #[error("invalid address {address:?}: {reason}")]
    Address { address: String, reason: String },

    /// The message could not be assembled
    #[error("failed to build message: {0}")]
    Build(String),

    /// The transport rejected or failed to deliver the message
    #[error("transport error: {0}")]
    Transport(String),
}

/// Sends one team assignment notice to one participant.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_team_assignment(&self, notice: &TeamAssignmentNotice) -> Result<(), MailError>;
}

/// Build the mailer selected by the configuration.
pub fn mailer_from_config(config: &MailConfig) -> Result<Arc<dyn Mailer>, MailError> {
    match config {
        MailConfig::Disabled => Ok(Arc::new(LogMailer)),
        MailConfig::Smtp(smtp) => Ok(Arc::new(SmtpMailer::new(smtp)?)),
    }
}

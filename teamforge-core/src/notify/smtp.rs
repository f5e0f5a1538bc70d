use super::{MailError, Mailer};
use crate::config::SmtpConfig;
use async_trait::async_trait;
use lettre::address::AddressError;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use teamforge_sdk::objects::TeamAssignmentNotice;
use tracing::debug;

/// Delivers notices through an SMTP relay with STARTTLS.
///
/// The transport is built once and reused for every notice.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, MailError> {
        let from = mailbox(&config.from_name, &config.from_address)?;

        let credentials = Credentials::new(config.username.clone(), config.password.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| MailError::Transport(format!("SMTP relay {}: {e}", config.host)))?
            .port(config.port)
            .credentials(credentials)
            .timeout(Some(std::time::Duration::from_secs(30)))
            .build();

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_team_assignment(&self, notice: &TeamAssignmentNotice) -> Result<(), MailError> {
        let email = build_message(self.from.clone(), notice)?;

        self.transport
            .send(email)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        debug!(recipient = %notice.recipient_address, "Team assignment notice sent");
        Ok(())
    }
}

fn mailbox(name: &str, address: &str) -> Result<Mailbox, MailError> {
    let parsed: Address = address.parse().map_err(|e: AddressError| MailError::Address {
        address: address.to_string(),
        reason: e.to_string(),
    })?;
    let name = (!name.is_empty()).then(|| name.to_string());
    Ok(Mailbox::new(name, parsed))
}

fn build_message(from: Mailbox, notice: &TeamAssignmentNotice) -> Result<Message, MailError> {
    let to = mailbox(&notice.recipient_name, &notice.recipient_address)?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(notice.subject())
        .header(ContentType::TEXT_PLAIN)
        .body(notice.body())
        .map_err(|e| MailError::Build(e.to_string()))
}

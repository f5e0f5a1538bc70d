use super::{MailError, Mailer};
use async_trait::async_trait;
use teamforge_sdk::objects::TeamAssignmentNotice;
use tracing::info;

/// Mailer that only records notices in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_team_assignment(&self, notice: &TeamAssignmentNotice) -> Result<(), MailError> {
        info!(
            recipient = %notice.recipient_address,
            hackathon = %notice.hackathon_title,
            team = %notice.team_name,
            teammates = notice.teammate_names.len(),
            "Mail disabled, team assignment notice not sent"
        );
        Ok(())
    }
}

//! Post-commit notifications: one notice per member, then one real-time
//! event per hackathon.

use crate::entities::hackathon::EligibleHackathon;
use crate::entities::team::FormedTeam;
use crate::events::EventBus;
use crate::notify::Mailer;
use std::sync::Arc;
use teamforge_sdk::objects::{RealtimeEvent, TeamAssignmentNotice};
use tracing::{debug, info, warn};

/// Outcome of notifying one hackathon's participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NotifyReport {
    pub delivered: usize,
    pub failed: usize,
    pub event_published: bool,
}

/// Delivers notices and the `teams-formed` event.
///
/// Only called with teams that are already committed. Nothing here is
/// retried and no failure is propagated.
#[derive(Clone)]
pub struct FormationNotifier {
    mailer: Arc<dyn Mailer>,
    bus: Arc<dyn EventBus>,
}

impl FormationNotifier {
    pub fn new(mailer: Arc<dyn Mailer>, bus: Arc<dyn EventBus>) -> Self {
        Self { mailer, bus }
    }

    pub async fn notify(&self, hackathon: &EligibleHackathon, teams: &[FormedTeam]) -> NotifyReport {
        let mut report = NotifyReport::default();

        for team in teams {
            for member in &team.members {
                let notice = TeamAssignmentNotice {
                    recipient_address: member.participant.email.clone(),
                    recipient_name: member.participant.name.clone(),
                    hackathon_title: hackathon.title.clone(),
                    team_name: team.team.name.clone(),
                    problem_statement: team.team.problem_statement.clone(),
                    teammate_names: team.teammate_names(member.participant.id),
                };

                match self.mailer.send_team_assignment(&notice).await {
                    Ok(()) => report.delivered += 1,
                    Err(e) => {
                        report.failed += 1;
                        warn!(
                            hackathon_id = %hackathon.id,
                            participant_id = %member.participant.id,
                            team = %team.team.name,
                            error = %e,
                            "Failed to send team assignment notice"
                        );
                    }
                }
            }
        }

        let event = RealtimeEvent::teams_formed(
            hackathon.id,
            teams.iter().map(FormedTeam::to_response).collect(),
        );
        match self.bus.publish(event).await {
            Ok(subscribers) => {
                report.event_published = true;
                debug!(
                    hackathon_id = %hackathon.id,
                    subscribers,
                    "Published teams-formed event"
                );
            }
            Err(e) => {
                warn!(
                    hackathon_id = %hackathon.id,
                    error = %e,
                    "Failed to publish teams-formed event"
                );
            }
        }

        info!(
            hackathon_id = %hackathon.id,
            delivered = report.delivered,
            failed = report.failed,
            event_published = report.event_published,
            "Formation notifications done"
        );

        report
    }
}

//! Team formation.
//!
//! One formation pass runs per tick:
//!
//! 1. select hackathons whose registration deadline fell inside the tick
//!    window (`FormationStore::eligible_hackathons`)
//! 2. validate and randomly partition each one (`partition`)
//! 3. commit teams, memberships and the status change in one transaction
//!    (`FormationStore::commit_formation`)
//! 4. only after the commit, notify members and publish one real-time
//!    event (`FormationNotifier`)
//!
//! Hackathons are handled one after another and independently: a failure
//! for one is logged and the pass moves on. Only a failed selection aborts
//! the whole tick.

pub mod former;
pub mod notifier;
pub mod partition;
pub mod store;

#[cfg(test)]
mod testing;

pub use former::TeamFormer;
pub use notifier::{FormationNotifier, NotifyReport};
pub use partition::{PartitionPlan, PlannedMember, PlannedTeam, PreconditionError, partition};
pub use store::{FormationStore, PgFormationStore, StoreError};

use crate::config::SchedulerConfig;
use crate::entities::hackathon::EligibleHackathon;
use crate::events::EventBus;
use crate::notify::Mailer;
use crate::utils::eligibility_window::EligibilityWindow;
use partition::check_preconditions;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Why a single hackathon was not formed this tick.
#[derive(Debug, Error)]
pub enum FormationError {
    #[error("precondition failed: {0}")]
    Precondition(#[from] PreconditionError),

    #[error("commit failed: {0}")]
    Store(#[from] StoreError),
}

/// Summary of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    pub candidates: usize,
    pub formed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub notices_delivered: usize,
    pub notices_failed: usize,
}

/// A single formation pass and the collaborators it needs.
pub struct FormationPass {
    store: Arc<dyn FormationStore>,
    notifier: FormationNotifier,
    rng: Box<dyn RngCore + Send>,
    interval: Duration,
}

impl FormationPass {
    pub fn new(
        store: Arc<dyn FormationStore>,
        mailer: Arc<dyn Mailer>,
        bus: Arc<dyn EventBus>,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            store,
            notifier: FormationNotifier::new(mailer, bus),
            rng: Box::new(StdRng::from_os_rng()),
            interval: config.tick_interval,
        }
    }

    /// Replace the random source used for shuffling, problem draws and
    /// team names.
    pub fn with_rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run one tick at `now`.
    ///
    /// Returns an error only when selection fails; per-hackathon failures
    /// are counted in the report.
    pub async fn run_once(
        &mut self,
        now: time::PrimitiveDateTime,
    ) -> Result<TickReport, StoreError> {
        let window = EligibilityWindow::ending_at(now, self.interval);
        let candidates = self.store.eligible_hackathons(window).await?;

        let mut report = TickReport {
            candidates: candidates.len(),
            ..TickReport::default()
        };

        if candidates.is_empty() {
            debug!(start = %window.start, end = %window.end, "No hackathons due for team formation");
            return Ok(report);
        }

        info!(
            candidates = candidates.len(),
            start = %window.start,
            end = %window.end,
            "Forming teams"
        );

        for hackathon in &candidates {
            match self.form_one(hackathon).await {
                Ok(notified) => {
                    report.formed += 1;
                    report.notices_delivered += notified.delivered;
                    report.notices_failed += notified.failed;
                }
                Err(FormationError::Precondition(e)) => {
                    report.skipped += 1;
                    warn!(
                        hackathon_id = %hackathon.id,
                        error = %e,
                        "Skipping hackathon for this tick"
                    );
                }
                Err(FormationError::Store(StoreError::AlreadyFormed(id))) => {
                    report.failed += 1;
                    warn!(hackathon_id = %id, "Teams were formed concurrently, rolled back");
                }
                Err(e) => {
                    report.failed += 1;
                    error!(
                        hackathon_id = %hackathon.id,
                        error = %e,
                        "Team formation failed, rolled back"
                    );
                }
            }
        }

        Ok(report)
    }

    #[tracing::instrument(skip_all, fields(hackathon_id = %hackathon.id))]
    async fn form_one(
        &mut self,
        hackathon: &EligibleHackathon,
    ) -> Result<NotifyReport, FormationError> {
        let team_size = check_preconditions(hackathon)?;
        let plan = partition(
            &hackathon.participants,
            team_size,
            &hackathon.problem_statements,
            &mut self.rng,
        )?;

        let teams = self.store.commit_formation(hackathon, &plan).await?;
        info!(
            teams = teams.len(),
            participants = plan.member_count(),
            "Teams formed"
        );

        Ok(self.notifier.notify(hackathon, &teams).await)
    }
}

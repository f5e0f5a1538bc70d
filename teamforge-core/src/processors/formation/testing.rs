//! In-memory collaborators for exercising the formation pass.

use super::partition::PartitionPlan;
use super::store::{FormationStore, StoreError, materialize_plan};
use crate::entities::HackathonStatus;
use crate::entities::hackathon::EligibleHackathon;
use crate::entities::participant::Participant;
use crate::entities::team::{FormedTeam, Team};
use crate::entities::team_membership::TeamMembership;
use crate::events::{BusError, EventBus, RealtimeEvent};
use crate::notify::{MailError, Mailer};
use crate::utils::eligibility_window::EligibilityWindow;
use crate::utils::utc_now;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use teamforge_sdk::objects::TeamAssignmentNotice;
use uuid::Uuid;

/// Ordered record of side effects shared by the fakes below.
#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

pub fn hackathon(
    participants: usize,
    max_team_size: i32,
    problem_count: usize,
    deadline: time::PrimitiveDateTime,
) -> EligibleHackathon {
    let id = Uuid::new_v4();
    EligibleHackathon {
        id,
        title: format!("Hackathon {}", &id.to_string()[..8]),
        registration_deadline: deadline,
        max_team_size,
        problem_statements: (0..problem_count).map(|i| format!("Problem {i}")).collect(),
        participants: (0..participants)
            .map(|i| Participant {
                id: Uuid::new_v4(),
                name: format!("Participant {i}"),
                email: format!("p{i}.{}@example.com", &id.to_string()[..8]),
                skills: vec!["rust".to_string()],
            })
            .collect(),
    }
}

struct StoredHackathon {
    hackathon: EligibleHackathon,
    is_active: bool,
    status: HackathonStatus,
    teams_formed: bool,
}

#[derive(Default)]
struct StoreState {
    hackathons: HashMap<Uuid, StoredHackathon>,
    teams: Vec<Team>,
    memberships: Vec<TeamMembership>,
    fail_selection: bool,
    fail_commit: HashSet<Uuid>,
    commit_delay: Option<Duration>,
    select_calls: usize,
}

/// A [`FormationStore`] that applies the same selection predicate and
/// status guard as the Postgres store, without a database.
pub struct InMemoryStore {
    state: Mutex<StoreState>,
    journal: Journal,
}

impl InMemoryStore {
    pub fn new(journal: Journal) -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
            journal,
        }
    }

    pub fn insert(&self, hackathon: EligibleHackathon) {
        self.insert_with(hackathon, true);
    }

    pub fn insert_inactive(&self, hackathon: EligibleHackathon) {
        self.insert_with(hackathon, false);
    }

    fn insert_with(&self, hackathon: EligibleHackathon, is_active: bool) {
        self.state.lock().unwrap().hackathons.insert(
            hackathon.id,
            StoredHackathon {
                hackathon,
                is_active,
                status: HackathonStatus::RegistrationOpen,
                teams_formed: false,
            },
        );
    }

    pub fn fail_commit_for(&self, hackathon_id: Uuid) {
        self.state.lock().unwrap().fail_commit.insert(hackathon_id);
    }

    pub fn fail_selection(&self, fail: bool) {
        self.state.lock().unwrap().fail_selection = fail;
    }

    pub fn clear_failures(&self) {
        let mut state = self.state.lock().unwrap();
        state.fail_commit.clear();
        state.fail_selection = false;
    }

    pub fn set_commit_delay(&self, delay: Duration) {
        self.state.lock().unwrap().commit_delay = Some(delay);
    }

    pub fn select_calls(&self) -> usize {
        self.state.lock().unwrap().select_calls
    }

    pub fn status(&self, hackathon_id: Uuid) -> (HackathonStatus, bool) {
        let state = self.state.lock().unwrap();
        let stored = &state.hackathons[&hackathon_id];
        (stored.status, stored.teams_formed)
    }

    pub fn teams_for(&self, hackathon_id: Uuid) -> Vec<Team> {
        let state = self.state.lock().unwrap();
        state
            .teams
            .iter()
            .filter(|t| t.hackathon_id == hackathon_id)
            .cloned()
            .collect()
    }

    pub fn memberships_for(&self, hackathon_id: Uuid) -> Vec<TeamMembership> {
        let state = self.state.lock().unwrap();
        state
            .memberships
            .iter()
            .filter(|m| m.hackathon_id == hackathon_id)
            .cloned()
            .collect()
    }

    pub fn memberships_for_team(&self, team_id: Uuid) -> Vec<TeamMembership> {
        let state = self.state.lock().unwrap();
        state
            .memberships
            .iter()
            .filter(|m| m.team_id == team_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl FormationStore for InMemoryStore {
    async fn eligible_hackathons(
        &self,
        window: EligibilityWindow,
    ) -> Result<Vec<EligibleHackathon>, StoreError> {
        let mut state = self.state.lock().unwrap();
        state.select_calls += 1;
        if state.fail_selection {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        let mut eligible: Vec<EligibleHackathon> = state
            .hackathons
            .values()
            .filter(|s| {
                s.is_active
                    && s.status == HackathonStatus::RegistrationOpen
                    && !s.teams_formed
                    && window.contains(s.hackathon.registration_deadline)
                    && !s.hackathon.problem_statements.is_empty()
                    && !s.hackathon.participants.is_empty()
            })
            .map(|s| s.hackathon.clone())
            .collect();
        eligible.sort_by_key(|h| (h.registration_deadline, h.id));
        Ok(eligible)
    }

    async fn commit_formation(
        &self,
        hackathon: &EligibleHackathon,
        plan: &PartitionPlan,
    ) -> Result<Vec<FormedTeam>, StoreError> {
        self.journal.push(format!("commit:start:{}", hackathon.id));
        let delay = self.state.lock().unwrap().commit_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let formed = materialize_plan(hackathon.id, plan, utc_now());
        let mut state = self.state.lock().unwrap();

        // Staged writes are simply dropped on failure.
        let staged_teams: Vec<Team> = formed.iter().map(|f| f.team.clone()).collect();
        let staged_memberships: Vec<TeamMembership> = formed
            .iter()
            .flat_map(|f| f.members.iter().map(|m| m.membership.clone()))
            .collect();

        if state.fail_commit.contains(&hackathon.id) {
            return Err(StoreError::Database(sqlx::Error::Protocol(
                "connection reset before status update".to_string(),
            )));
        }

        let stored = state
            .hackathons
            .get_mut(&hackathon.id)
            .ok_or(StoreError::Database(sqlx::Error::RowNotFound))?;
        if stored.status != HackathonStatus::RegistrationOpen || stored.teams_formed {
            return Err(StoreError::AlreadyFormed(hackathon.id));
        }
        stored.status = HackathonStatus::RegistrationClosed;
        stored.teams_formed = true;

        state.teams.extend(staged_teams);
        state.memberships.extend(staged_memberships);
        self.journal.push(format!("commit:done:{}", hackathon.id));
        Ok(formed)
    }
}

/// Records notices, failing for chosen recipient addresses.
pub struct SpyMailer {
    delivered: Mutex<Vec<TeamAssignmentNotice>>,
    attempts: Mutex<usize>,
    failing: Mutex<HashSet<String>>,
    journal: Journal,
}

impl SpyMailer {
    pub fn new(journal: Journal) -> Self {
        Self {
            delivered: Mutex::new(Vec::new()),
            attempts: Mutex::new(0),
            failing: Mutex::new(HashSet::new()),
            journal,
        }
    }

    pub fn fail_for(&self, address: &str) {
        self.failing.lock().unwrap().insert(address.to_string());
    }

    pub fn notices(&self) -> Vec<TeamAssignmentNotice> {
        self.delivered.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl Mailer for SpyMailer {
    async fn send_team_assignment(&self, notice: &TeamAssignmentNotice) -> Result<(), MailError> {
        *self.attempts.lock().unwrap() += 1;
        if self.failing.lock().unwrap().contains(&notice.recipient_address) {
            return Err(MailError::Transport("mailbox unavailable".to_string()));
        }
        self.journal.push(format!("mail:{}", notice.recipient_address));
        self.delivered.lock().unwrap().push(notice.clone());
        Ok(())
    }
}

/// Records published events.
pub struct SpyBus {
    events: Mutex<Vec<RealtimeEvent>>,
    failing: Mutex<bool>,
    journal: Journal,
}

impl SpyBus {
    pub fn new(journal: Journal) -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            failing: Mutex::new(false),
            journal,
        }
    }

    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    pub fn events(&self) -> Vec<RealtimeEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventBus for SpyBus {
    async fn publish(&self, event: RealtimeEvent) -> Result<usize, BusError> {
        if *self.failing.lock().unwrap() {
            return Err(BusError::Closed);
        }
        self.journal.push(format!("event:{}", event.channel));
        self.events.lock().unwrap().push(event);
        Ok(1)
    }
}

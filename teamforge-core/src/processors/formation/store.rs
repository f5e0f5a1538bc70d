//! Persistence seam of the formation pass: candidate selection and the
//! transactional commit of a partition plan.

use super::partition::PartitionPlan;
use crate::entities::hackathon::{
    EligibleHackathon, FormationCandidate, GetFormationCandidates, Hackathon,
};
use crate::entities::participant::{GetHackathonParticipants, Participant};
use crate::entities::team::{FormedMember, FormedTeam, Team};
use crate::entities::team_membership::TeamMembership;
use crate::entities::{MembershipStatus, SubmissionStatus};
use crate::framework::DatabaseProcessor;
use crate::utils::eligibility_window::EligibilityWindow;
use crate::utils::utc_now;
use async_trait::async_trait;
use itertools::Itertools;
use kanau::processor::Processor;
use sqlx::PgPool;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

/// Errors raised by a [`FormationStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The status guard did not match: teams were already formed, or the
    /// hackathon left `registration_open` in the meantime.
    #[error("teams already formed for hackathon {0}")]
    AlreadyFormed(Uuid),
}

/// Store operations needed by the formation pass.
#[async_trait]
pub trait FormationStore: Send + Sync {
    /// Hackathons eligible for formation whose deadline lies in `window`,
    /// with participants and problem statements loaded.
    ///
    /// An empty result is not an error.
    async fn eligible_hackathons(
        &self,
        window: EligibilityWindow,
    ) -> Result<Vec<EligibleHackathon>, StoreError>;

    /// Persist teams, memberships and the status transition as one unit.
    ///
    /// On error nothing has been written.
    async fn commit_formation(
        &self,
        hackathon: &EligibleHackathon,
        plan: &PartitionPlan,
    ) -> Result<Vec<FormedTeam>, StoreError>;
}

/// Turn a plan into the records to insert, with fresh ids.
pub fn materialize_plan(
    hackathon_id: Uuid,
    plan: &PartitionPlan,
    now: time::PrimitiveDateTime,
) -> Vec<FormedTeam> {
    plan.teams
        .iter()
        .map(|planned| {
            let team = Team {
                id: Uuid::now_v7(),
                hackathon_id,
                name: planned.name.clone(),
                problem_statement: planned.problem_statement.clone(),
                submission_status: SubmissionStatus::NotSubmitted,
                created_at: now,
            };
            let members = planned
                .members
                .iter()
                .map(|member| FormedMember {
                    membership: TeamMembership {
                        id: Uuid::now_v7(),
                        team_id: team.id,
                        hackathon_id,
                        participant_id: member.participant.id,
                        role: member.role,
                        status: MembershipStatus::Active,
                        joined_at: now,
                    },
                    participant: member.participant.clone(),
                })
                .collect();
            FormedTeam { team, members }
        })
        .collect()
}

/// [`FormationStore`] backed by Postgres.
#[derive(Clone)]
pub struct PgFormationStore {
    db: DatabaseProcessor,
}

impl PgFormationStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            db: DatabaseProcessor { pool },
        }
    }
}

#[async_trait]
impl FormationStore for PgFormationStore {
    async fn eligible_hackathons(
        &self,
        window: EligibilityWindow,
    ) -> Result<Vec<EligibleHackathon>, StoreError> {
        let candidates: Vec<FormationCandidate> = self
            .db
            .process(GetFormationCandidates {
                window_start: window.start,
                window_end: window.end,
            })
            .await?;

        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let hackathon_ids = candidates.iter().map(|c| c.id).collect();
        let mut participants: HashMap<Uuid, Vec<Participant>> = self
            .db
            .process(GetHackathonParticipants { hackathon_ids })
            .await?
            .into_iter()
            .map(|row| (row.hackathon_id, row.participant))
            .into_group_map();

        let eligible = candidates
            .into_iter()
            .map(|candidate| {
                let members = participants.remove(&candidate.id).unwrap_or_default();
                candidate.with_participants(members)
            })
            .collect();
        Ok(eligible)
    }

    async fn commit_formation(
        &self,
        hackathon: &EligibleHackathon,
        plan: &PartitionPlan,
    ) -> Result<Vec<FormedTeam>, StoreError> {
        let formed = materialize_plan(hackathon.id, plan, utc_now());
        let teams: Vec<Team> = formed.iter().map(|f| f.team.clone()).collect();
        let memberships: Vec<TeamMembership> = formed
            .iter()
            .flat_map(|f| f.members.iter().map(|m| m.membership.clone()))
            .collect();

        // Dropping `tx` on any early return rolls everything back.
        let mut tx = self.db.pool.begin().await?;

        if !Hackathon::close_registration_tx(&mut tx, hackathon.id).await? {
            return Err(StoreError::AlreadyFormed(hackathon.id));
        }

        let teams_inserted = Team::insert_many_tx(&mut tx, &teams).await?;
        let memberships_inserted = TeamMembership::insert_many_tx(&mut tx, &memberships).await?;

        tx.commit().await?;

        debug!(
            hackathon_id = %hackathon.id,
            teams = teams_inserted,
            memberships = memberships_inserted,
            "Formation committed"
        );

        Ok(formed)
    }
}

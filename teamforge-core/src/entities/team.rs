use crate::entities::participant::Participant;
use crate::entities::team_membership::TeamMembership;
use crate::entities::{MAX_ROWS_PER_INSERT, SubmissionStatus};
use teamforge_sdk::objects::{MemberResponse, TeamResponse};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Team {
    pub id: Uuid,
    pub hackathon_id: Uuid,
    pub name: String,
    pub problem_statement: String,
    pub submission_status: SubmissionStatus,
    pub created_at: time::PrimitiveDateTime,
}

/// A created team together with its memberships and the resolved
/// participant of each membership, in partition order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormedTeam {
    pub team: Team,
    pub members: Vec<FormedMember>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormedMember {
    pub membership: TeamMembership,
    pub participant: Participant,
}

impl FormedTeam {
    /// Names of every member except `participant_id`, in team order.
    pub fn teammate_names(&self, participant_id: Uuid) -> Vec<String> {
        self.members
            .iter()
            .filter(|m| m.participant.id != participant_id)
            .map(|m| m.participant.name.clone())
            .collect()
    }

    pub fn to_response(&self) -> TeamResponse {
        TeamResponse {
            team_id: self.team.id,
            hackathon_id: self.team.hackathon_id,
            name: self.team.name.clone(),
            problem_statement: self.team.problem_statement.clone(),
            submission_status: self.team.submission_status.into(),
            members: self
                .members
                .iter()
                .map(|m| MemberResponse {
                    membership_id: m.membership.id,
                    participant_id: m.participant.id,
                    name: m.participant.name.clone(),
                    email: m.participant.email.clone(),
                    skills: m.participant.skills.clone(),
                    role: m.membership.role.into(),
                    status: m.membership.status.into(),
                })
                .collect(),
            created_at: self.team.created_at.assume_utc().unix_timestamp(),
        }
    }
}

impl Team {
    /// Insert several teams within a transaction, batching rows per statement.
    pub async fn insert_many_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        teams: &[Team],
    ) -> Result<u64, sqlx::Error> {
        let mut inserted = 0;
        for chunk in teams.chunks(MAX_ROWS_PER_INSERT) {
            let mut query_builder = sqlx::QueryBuilder::new(
                "INSERT INTO teams \
                (id, hackathon_id, name, problem_statement, submission_status, created_at) ",
            );

            query_builder.push_values(chunk, |mut b, team| {
                b.push_bind(team.id)
                    .push_bind(team.hackathon_id)
                    .push_bind(team.name.clone())
                    .push_bind(team.problem_statement.clone())
                    .push_bind(team.submission_status)
                    .push_bind(team.created_at);
            });

            let result = query_builder.build().execute(&mut **tx).await?;
            inserted += result.rows_affected();
        }
        Ok(inserted)
    }
}

use crate::entities::HackathonStatus;
use crate::entities::participant::Participant;
use crate::framework::DatabaseProcessor;
use kanau::processor::Processor;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Hackathon {
    pub id: Uuid,
    pub title: String,
    pub registration_deadline: time::PrimitiveDateTime,
    pub is_active: bool,
    pub status: HackathonStatus,
    pub max_team_size: i32,
    pub problem_statements: Vec<String>,
    pub teams_formed: bool,
    pub created_at: time::PrimitiveDateTime,
    pub updated_at: time::PrimitiveDateTime,
}

/// A hackathon selected for team formation, with everything the partitioner
/// needs already loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibleHackathon {
    pub id: Uuid,
    pub title: String,
    pub registration_deadline: time::PrimitiveDateTime,
    pub max_team_size: i32,
    pub problem_statements: Vec<String>,
    /// Participants in registration order.
    pub participants: Vec<Participant>,
}

/// Candidate row returned by the selector query, before participants are
/// attached.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct FormationCandidate {
    pub id: Uuid,
    pub title: String,
    pub registration_deadline: time::PrimitiveDateTime,
    pub max_team_size: i32,
    pub problem_statements: Vec<String>,
}

impl FormationCandidate {
    pub fn with_participants(self, participants: Vec<Participant>) -> EligibleHackathon {
        EligibleHackathon {
            id: self.id,
            title: self.title,
            registration_deadline: self.registration_deadline,
            max_team_size: self.max_team_size,
            problem_statements: self.problem_statements,
            participants,
        }
    }
}

#[derive(Debug, Clone)]
/// Get hackathons whose registration deadline lies in `[window_start, window_end]`
/// and that are still waiting for their teams.
///
/// Only active, `registration_open` hackathons that have not formed teams,
/// have at least one problem statement and at least one participant qualify.
pub struct GetFormationCandidates {
    pub window_start: time::PrimitiveDateTime,
    pub window_end: time::PrimitiveDateTime,
}

impl Processor<GetFormationCandidates> for DatabaseProcessor {
    type Output = Vec<FormationCandidate>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetFormationCandidates")]
    async fn process(
        &self,
        query: GetFormationCandidates,
    ) -> Result<Vec<FormationCandidate>, sqlx::Error> {
        let candidates = sqlx::query_as::<_, FormationCandidate>(
            r#"
            SELECT
                h.id,
                h.title,
                h.registration_deadline,
                h.max_team_size,
                h.problem_statements
            FROM hackathons h
            WHERE h.registration_deadline BETWEEN $1 AND $2
              AND h.is_active = true
              AND h.status = 'registration_open'
              AND h.teams_formed = false
              AND cardinality(h.problem_statements) > 0
              AND EXISTS (
                  SELECT 1 FROM hackathon_participants hp
                  WHERE hp.hackathon_id = h.id
              )
            ORDER BY h.registration_deadline ASC
            "#,
        )
        .bind(query.window_start)
        .bind(query.window_end)
        .fetch_all(&self.pool)
        .await?;
        Ok(candidates)
    }
}

#[derive(Debug, Clone)]
pub struct GetHackathonById {
    pub hackathon_id: Uuid,
}

impl Processor<GetHackathonById> for DatabaseProcessor {
    type Output = Option<Hackathon>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetHackathonById")]
    async fn process(&self, query: GetHackathonById) -> Result<Option<Hackathon>, sqlx::Error> {
        let hackathon = sqlx::query_as::<_, Hackathon>(
            r#"
            SELECT
                id,
                title,
                registration_deadline,
                is_active,
                status,
                max_team_size,
                problem_statements,
                teams_formed,
                created_at,
                updated_at
            FROM hackathons
            WHERE id = $1
            "#,
        )
        .bind(query.hackathon_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(hackathon)
    }
}

impl Hackathon {
    /// Close registration and mark teams as formed within a transaction.
    ///
    /// The update only applies while the hackathon is still
    /// `registration_open` without formed teams. Returns `false` when the
    /// guard did not match, i.e. another transaction already formed the
    /// teams. The row lock taken here serialises competing formations.
    pub async fn close_registration_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        hackathon_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE hackathons
            SET status = 'registration_closed',
                teams_formed = true,
                updated_at = NOW()
            WHERE id = $1
              AND status = 'registration_open'
              AND teams_formed = false
            "#,
        )
        .bind(hackathon_id)
        .execute(&mut **tx)
        .await?;
        Ok(result.rows_affected() == 1)
    }
}

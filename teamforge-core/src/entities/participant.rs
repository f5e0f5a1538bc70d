use crate::framework::DatabaseProcessor;
use kanau::processor::Processor;
use uuid::Uuid;

/// A registered participant. Read-only for team formation.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Participant {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub skills: Vec<String>,
}

/// A participant row tagged with the hackathon it registered for.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct HackathonParticipant {
    pub hackathon_id: Uuid,
    #[sqlx(flatten)]
    pub participant: Participant,
}

#[derive(Debug, Clone)]
/// Get the participants of several hackathons in one query.
///
/// Rows come back grouped by hackathon and in registration order within
/// each hackathon.
pub struct GetHackathonParticipants {
    pub hackathon_ids: Vec<Uuid>,
}

impl Processor<GetHackathonParticipants> for DatabaseProcessor {
    type Output = Vec<HackathonParticipant>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetHackathonParticipants")]
    async fn process(
        &self,
        query: GetHackathonParticipants,
    ) -> Result<Vec<HackathonParticipant>, sqlx::Error> {
        if query.hackathon_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, HackathonParticipant>(
            r#"
            SELECT
                hp.hackathon_id,
                p.id,
                p.name,
                p.email,
                p.skills
            FROM hackathon_participants hp
            JOIN participants p ON p.id = hp.participant_id
            WHERE hp.hackathon_id = ANY($1)
            ORDER BY hp.hackathon_id, hp.registered_at ASC, p.id ASC
            "#,
        )
        .bind(&query.hackathon_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

use crate::entities::{MAX_ROWS_PER_INSERT, MemberRole, MembershipStatus};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct TeamMembership {
    pub id: Uuid,
    pub team_id: Uuid,
    pub hackathon_id: Uuid,
    pub participant_id: Uuid,
    pub role: MemberRole,
    pub status: MembershipStatus,
    pub joined_at: time::PrimitiveDateTime,
}

impl TeamMembership {
    /// Insert several memberships within a transaction, batching rows per statement.
    ///
    /// The `(hackathon_id, participant_id)` unique index rejects the whole
    /// statement if a participant is already on a team for the hackathon.
    pub async fn insert_many_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        memberships: &[TeamMembership],
    ) -> Result<u64, sqlx::Error> {
        let mut inserted = 0;
        for chunk in memberships.chunks(MAX_ROWS_PER_INSERT) {
            let mut query_builder = sqlx::QueryBuilder::new(
                "INSERT INTO team_memberships \
                (id, team_id, hackathon_id, participant_id, role, status, joined_at) ",
            );

            query_builder.push_values(chunk, |mut b, membership| {
                b.push_bind(membership.id)
                    .push_bind(membership.team_id)
                    .push_bind(membership.hackathon_id)
                    .push_bind(membership.participant_id)
                    .push_bind(membership.role)
                    .push_bind(membership.status)
                    .push_bind(membership.joined_at);
            });

            let result = query_builder.build().execute(&mut **tx).await?;
            inserted += result.rows_affected();
        }
        Ok(inserted)
    }
}

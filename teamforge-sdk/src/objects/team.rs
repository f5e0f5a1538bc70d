//! Team snapshots as seen by clients.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of a member inside a team.
///
/// This is the API/DTO version without sqlx::Type.
/// For database operations, use the version in `teamforge-core::entities`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    Leader,
    Developer,
}

impl std::fmt::Display for MemberRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemberRole::Leader => write!(f, "leader"),
            MemberRole::Developer => write!(f, "developer"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipStatus {
    Active,
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    NotSubmitted,
    Submitted,
}

/// A single team member with the participant details resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberResponse {
    pub membership_id: Uuid,
    pub participant_id: Uuid,
    pub name: String,
    pub email: String,
    pub skills: Vec<String>,
    pub role: MemberRole,
    pub status: MembershipStatus,
}

/// A formed team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamResponse {
    pub team_id: Uuid,
    pub hackathon_id: Uuid,
    pub name: String,
    pub problem_statement: String,
    pub submission_status: SubmissionStatus,
    /// Members in partition order; the leader comes first.
    pub members: Vec<MemberResponse>,
    /// Unix timestamp of when the team was created.
    pub created_at: i64,
}

impl TeamResponse {
    /// The member holding the `leader` role, if any.
    pub fn leader(&self) -> Option<&MemberResponse> {
        self.members.iter().find(|m| m.role == MemberRole::Leader)
    }
}

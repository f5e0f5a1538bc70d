pub mod hackathon;
pub mod participant;
pub mod team;
pub mod team_membership;

/// Rows per bulk insert statement, keeping binds well under the
/// Postgres limit of 65535 parameters.
pub(crate) const MAX_ROWS_PER_INSERT: usize = 1000;

use teamforge_sdk::objects::{
    MemberRole as SdkMemberRole, MembershipStatus as SdkMembershipStatus,
    SubmissionStatus as SdkSubmissionStatus,
};

/// Lifecycle of a hackathon.
///
/// Team formation only ever moves a hackathon from `RegistrationOpen` to
/// `RegistrationClosed`; the later states belong to other features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(rename_all = "snake_case", type_name = "hackathon_status")]
pub enum HackathonStatus {
    RegistrationOpen,
    RegistrationClosed,
    Ongoing,
    Completed,
}

/// Member role for database operations.
///
/// This is the sqlx::Type version. For API/DTO use, see `teamforge_sdk::objects::MemberRole`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(rename_all = "snake_case", type_name = "member_role")]
pub enum MemberRole {
    Leader,
    Developer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(rename_all = "snake_case", type_name = "membership_status")]
pub enum MembershipStatus {
    Active,
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(rename_all = "snake_case", type_name = "submission_status")]
pub enum SubmissionStatus {
    NotSubmitted,
    Submitted,
}

impl From<MemberRole> for SdkMemberRole {
    fn from(value: MemberRole) -> Self {
        match value {
            MemberRole::Leader => SdkMemberRole::Leader,
            MemberRole::Developer => SdkMemberRole::Developer,
        }
    }
}

impl From<SdkMemberRole> for MemberRole {
    fn from(value: SdkMemberRole) -> Self {
        match value {
            SdkMemberRole::Leader => MemberRole::Leader,
            SdkMemberRole::Developer => MemberRole::Developer,
        }
    }
}

impl From<MembershipStatus> for SdkMembershipStatus {
    fn from(value: MembershipStatus) -> Self {
        match value {
            MembershipStatus::Active => SdkMembershipStatus::Active,
            MembershipStatus::Left => SdkMembershipStatus::Left,
        }
    }
}

impl From<SubmissionStatus> for SdkSubmissionStatus {
    fn from(value: SubmissionStatus) -> Self {
        match value {
            SubmissionStatus::NotSubmitted => SdkSubmissionStatus::NotSubmitted,
            SubmissionStatus::Submitted => SdkSubmissionStatus::Submitted,
        }
    }
}

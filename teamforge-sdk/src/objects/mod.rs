pub mod events;
pub mod notice;
pub mod team;
pub mod ws;

pub use events::{RealtimeEvent, TEAMS_FORMED, TeamsFormedPayload};
pub use notice::TeamAssignmentNotice;
pub use team::{MemberResponse, MemberRole, MembershipStatus, SubmissionStatus, TeamResponse};
pub use ws::{WsCloseCode, WsServerMessage};

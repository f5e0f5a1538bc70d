//! Real-time events pushed to subscribed clients.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::team::TeamResponse;

/// Event type emitted once per hackathon after its teams are committed.
pub const TEAMS_FORMED: &str = "teams-formed";

/// Payload of a `teams-formed` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamsFormedPayload {
    pub hackathon_id: Uuid,
    pub teams: Vec<TeamResponse>,
}

/// An event addressed to the subscribers of one channel.
///
/// The channel is the hackathon id; clients subscribe per hackathon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealtimeEvent {
    pub channel: Uuid,
    pub event_type: String,
    pub payload: TeamsFormedPayload,
}

impl RealtimeEvent {
    pub fn teams_formed(hackathon_id: Uuid, teams: Vec<TeamResponse>) -> Self {
        Self {
            channel: hackathon_id,
            event_type: TEAMS_FORMED.to_string(),
            payload: TeamsFormedPayload {
                hackathon_id,
                teams,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_teams_formed_addresses_hackathon_channel() {
        let id = Uuid::new_v4();
        let event = RealtimeEvent::teams_formed(id, vec![]);
        assert_eq!(event.channel, id);
        assert_eq!(event.payload.hackathon_id, id);
        assert_eq!(event.event_type, "teams-formed");
    }

    #[test]
    fn test_event_json_shape() {
        let id = Uuid::nil();
        let event = RealtimeEvent::teams_formed(id, vec![]);
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["event_type"], "teams-formed");
        assert_eq!(value["payload"]["teams"], serde_json::json!([]));
        assert_eq!(
            value["channel"],
            "00000000-0000-0000-0000-000000000000"
        );
    }
}

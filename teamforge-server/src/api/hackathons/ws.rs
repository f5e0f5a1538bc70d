use axum::{
    extract::{
        Path, State,
        ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use kanau::processor::Processor;
use teamforge_core::entities::hackathon::GetHackathonById;
use teamforge_core::events::{RealtimeEvent, RealtimeEventReceiver};
use teamforge_core::framework::DatabaseProcessor;
use teamforge_sdk::objects::TEAMS_FORMED;
use teamforge_sdk::objects::ws::{WsCloseCode, WsServerMessage};
use tokio::sync::broadcast::error::RecvError;
use uuid::Uuid;

use super::HackathonApiError;
use crate::state::AppState;

/// `GET /hackathons/{hackathon_id}/ws`: real-time event stream.
///
/// Responds 404 for an unknown hackathon. Otherwise upgrades the
/// connection and pushes a [`WsServerMessage::TeamsFormed`] frame for every
/// `teams-formed` event published for this hackathon.
pub(super) async fn hackathon_events_ws(
    state: State<AppState>,
    Path(hackathon_id): Path<Uuid>,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, HackathonApiError> {
    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    processor
        .process(GetHackathonById { hackathon_id })
        .await
        .map_err(HackathonApiError::Database)?
        .ok_or(HackathonApiError::NotFound)?;

    // Subscribe before the upgrade completes so an event published while
    // the handshake is in flight is still buffered for this client.
    let events_rx = state.events.subscribe();

    Ok(ws.on_upgrade(move |socket| handle_hackathon_ws(socket, events_rx, hackathon_id)))
}

/// The frame to forward for `event`, if it concerns `hackathon_id`.
fn frame_for(event: RealtimeEvent, hackathon_id: Uuid) -> Option<WsServerMessage> {
    if event.channel != hackathon_id || event.event_type != TEAMS_FORMED {
        return None;
    }
    Some(WsServerMessage::TeamsFormed(event.payload))
}

/// Background task that drives a single WebSocket connection.
///
/// Relays events until the client disconnects or the event channel
/// closes. Client frames other than `Close` are ignored.
async fn handle_hackathon_ws(
    mut socket: WebSocket,
    mut events_rx: RealtimeEventReceiver,
    hackathon_id: Uuid,
) {
    tracing::debug!(%hackathon_id, "WS: client subscribed");

    loop {
        tokio::select! {
            result = events_rx.recv() => {
                match result {
                    Ok(event) => {
                        let Some(msg) = frame_for(event, hackathon_id) else {
                            continue;
                        };
                        if send_json(&mut socket, &msg).await.is_err() {
                            return;
                        }
                    }
                    Err(RecvError::Lagged(n)) => {
                        tracing::warn!(
                            %hackathon_id,
                            skipped = n,
                            "WS: broadcast receiver lagged"
                        );
                        let msg = WsServerMessage::Error {
                            code: WsCloseCode::LAGGED,
                            reason: format!("missed {n} events"),
                        };
                        if send_json(&mut socket, &msg).await.is_err() {
                            return;
                        }
                    }
                    Err(RecvError::Closed) => {
                        break;
                    }
                }
            }

            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None | Some(Err(_)) => {
                        return;
                    }
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    let _ = socket
        .send(Message::Close(Some(CloseFrame {
            code: WsCloseCode::NORMAL,
            reason: "server shutting down".into(),
        })))
        .await;
}

/// Serialize `value` as JSON and send it as a text WebSocket frame.
///
/// Returns `Err(())` if the send fails (client disconnected).
async fn send_json<T: serde::Serialize>(socket: &mut WebSocket, value: &T) -> Result<(), ()> {
    let json = serde_json::to_string(value).map_err(|_| ())?;
    socket
        .send(Message::Text(json.into()))
        .await
        .map_err(|_| ())
}

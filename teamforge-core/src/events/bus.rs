use super::channels::RealtimeEventSender;
use async_trait::async_trait;
use teamforge_sdk::objects::RealtimeEvent;
use thiserror::Error;
use tracing::debug;

/// Errors returned by an [`EventBus`].
///
/// [`BroadcastEventBus`] never fails: a channel without receivers only
/// means nobody is listening. The variant exists for buses backed by an
/// external broker, which can go away.
#[derive(Debug, Error)]
pub enum BusError {
    /// The bus can no longer accept events.
    #[error("event bus closed")]
    Closed,
}

/// Publishes real-time events to whoever is subscribed right now.
#[async_trait]
pub trait EventBus: Send + Sync {
    /// Publish an event, returning how many subscribers it reached.
    async fn publish(&self, event: RealtimeEvent) -> Result<usize, BusError>;
}

/// [`EventBus`] backed by a tokio broadcast channel.
#[derive(Clone)]
pub struct BroadcastEventBus {
    tx: RealtimeEventSender,
}

impl BroadcastEventBus {
    pub fn new(tx: RealtimeEventSender) -> Self {
        Self { tx }
    }

    pub fn sender(&self) -> &RealtimeEventSender {
        &self.tx
    }
}

#[async_trait]
impl EventBus for BroadcastEventBus {
    async fn publish(&self, event: RealtimeEvent) -> Result<usize, BusError> {
        let channel = event.channel;
        match self.tx.send(event) {
            Ok(receivers) => Ok(receivers),
            Err(_) => {
                // No live subscriber is not a failure.
                debug!(%channel, "No subscribers for real-time event");
                Ok(0)
            }
        }
    }
}

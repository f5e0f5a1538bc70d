//! Event channel factories and handles.

use teamforge_sdk::objects::RealtimeEvent;
use tokio::sync::broadcast;

/// Default buffer size for the real-time event channel.
///
/// A subscriber more than this many events behind starts losing events.
pub const DEFAULT_CHANNEL_BUFFER: usize = 256;

/// Sender handle for real-time events.
pub type RealtimeEventSender = broadcast::Sender<RealtimeEvent>;
/// Receiver handle for real-time events.
pub type RealtimeEventReceiver = broadcast::Receiver<RealtimeEvent>;

/// Create a new real-time event channel.
///
/// The initial receiver is dropped; subscribers call
/// [`broadcast::Sender::subscribe`] on the returned sender.
pub fn realtime_event_channel() -> RealtimeEventSender {
    let (tx, _rx) = broadcast::channel(DEFAULT_CHANNEL_BUFFER);
    tx
}

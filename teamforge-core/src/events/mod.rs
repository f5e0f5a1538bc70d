//! Real-time event bus.
//!
//! Formation publishes one `teams-formed` event per hackathon after its
//! transaction commits. Events fan out through a broadcast channel to every
//! live subscriber (the WebSocket relay in the server); subscribers filter
//! by channel, which is the hackathon id.
//!
//! Delivery is best effort: no subscribers means nobody hears the event,
//! and a lagging subscriber loses the oldest events.

pub mod bus;
pub mod channels;

pub use bus::{BroadcastEventBus, BusError, EventBus};
pub use channels::{
    DEFAULT_CHANNEL_BUFFER, RealtimeEventReceiver, RealtimeEventSender, realtime_event_channel,
};

pub use teamforge_sdk::objects::RealtimeEvent;

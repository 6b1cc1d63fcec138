use bytes::Bytes;

/// A serialized event queued for one client.
///
/// The payload is shared between every recipient of the same broadcast.
#[derive(Debug, Clone)]
pub struct BroadcastMessage {
    /// Serialized JSON event (ready to frame)
    pub payload: Bytes,
    /// Event type for metrics/logging
    pub event_type: &'static str,
}

impl BroadcastMessage {
    pub fn new(payload: Bytes, event_type: &'static str) -> Self {
        Self {
            payload,
            event_type,
        }
    }
}

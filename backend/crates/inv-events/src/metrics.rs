use crate::BroadcastOutcome;

use metrics::{counter, gauge};

/// Metrics collector for event streams
#[derive(Clone)]
pub struct Metrics {
    prefix: &'static str,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            prefix: "inv_events",
        }
    }

    /// Record new stream registered
    pub fn connection_established(&self) {
        counter!(format!("{}_connections_established_total", self.prefix)).increment(1);
        gauge!(format!("{}_connections_active", self.prefix)).increment(1.0);
    }

    /// Record stream closed
    pub fn connection_closed(&self, reason: &'static str) {
        counter!(
            format!("{}_connections_closed_total", self.prefix),
            "reason" => reason
        )
        .increment(1);
        gauge!(format!("{}_connections_active", self.prefix)).decrement(1.0);
    }

    /// Record frame written to a client
    pub fn frame_sent(&self, frame_type: &'static str) {
        counter!(
            format!("{}_frames_sent_total", self.prefix),
            "type" => frame_type
        )
        .increment(1);
    }

    /// Record event handed to the registry
    pub fn event_published(&self, event_type: &'static str, outcome: BroadcastOutcome) {
        counter!(
            format!("{}_events_published_total", self.prefix),
            "type" => event_type
        )
        .increment(1);

        if outcome.dropped > 0 {
            counter!(
                format!("{}_messages_dropped_total", self.prefix),
                "type" => event_type
            )
            .increment(outcome.dropped as u64);
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

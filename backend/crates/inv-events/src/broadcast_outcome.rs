/// What happened to one broadcast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastOutcome {
    /// Clients the message was queued for
    pub delivered: usize,
    /// Privileged clients whose queue was full or already closed
    pub dropped: usize,
}

impl BroadcastOutcome {
    /// Number of clients the broadcast was addressed to
    pub fn recipients(&self) -> usize {
        self.delivered + self.dropped
    }
}

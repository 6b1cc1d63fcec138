use std::fmt;

/// Why a stream pump stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// The client went away
    PeerClosed,
    /// Writing a frame to the transport failed
    WriteFailed,
    /// The registry closed the queue (unregister, re-register, shutdown)
    QueueClosed,
}

impl CloseReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PeerClosed => "peer_closed",
            Self::WriteFailed => "write_failed",
            Self::QueueClosed => "queue_closed",
        }
    }
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

use crate::{EventsError, Result as EventsErrorResult};

use std::convert::Infallible;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use tokio::sync::mpsc;

/// Outbound side of one event stream.
#[async_trait]
pub trait EventTransport: Send + Sync {
    /// Write one complete frame. An error means the peer is unreachable.
    async fn write(&self, frame: Bytes) -> EventsErrorResult<()>;

    /// Resolves once the peer has gone away.
    async fn closed(&self);
}

/// Transport backed by a bounded channel whose receiver feeds an HTTP body.
///
/// Dropping the receiver (the server dropping the response body when the
/// client disconnects) is observed as the peer closing.
pub struct ChannelTransport {
    sender: mpsc::Sender<Result<Bytes, Infallible>>,
}

impl ChannelTransport {
    pub fn new(buffer: usize) -> (Self, mpsc::Receiver<Result<Bytes, Infallible>>) {
        let (sender, receiver) = mpsc::channel(buffer.max(1));
        (Self { sender }, receiver)
    }

    /// Adapt the receiving half into a body stream
    pub fn into_stream(
        receiver: mpsc::Receiver<Result<Bytes, Infallible>>,
    ) -> impl Stream<Item = Result<Bytes, Infallible>> + Send + 'static {
        futures::stream::unfold(receiver, |mut receiver| async move {
            receiver.recv().await.map(|frame| (frame, receiver))
        })
    }
}

#[async_trait]
impl EventTransport for ChannelTransport {
    async fn write(&self, frame: Bytes) -> EventsErrorResult<()> {
        self.sender
            .send(Ok(frame))
            .await
            .map_err(|_| EventsError::transport_closed())
    }

    async fn closed(&self) {
        self.sender.closed().await
    }
}

use crate::{
    ClientHandle, CloseReason, ConnectionId, ConnectionRegistry, EventTransport, Metrics, frame,
};

use inv_auth::IdentityContext;
use inv_config::StreamConfig;

use log::{debug, info, warn};
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpState {
    /// Registered, handshake not yet written
    Connecting,
    Streaming,
    Closed,
}

/// Relays one client's queue to its transport.
///
/// Connecting -> Streaming -> Closed. Closing the queue from the registry is
/// the only cancellation signal; the pump never retries a failed write.
pub struct StreamPump {
    registry: ConnectionRegistry,
    handle: ClientHandle,
    config: StreamConfig,
    metrics: Metrics,
    state: PumpState,
    close_reason: Option<CloseReason>,
}

impl StreamPump {
    /// Register the caller. Authorization has already happened upstream.
    pub fn connect(
        registry: ConnectionRegistry,
        identity: &IdentityContext,
        config: StreamConfig,
        metrics: Metrics,
    ) -> Self {
        let handle = registry.register(identity.tenant_id, identity.user_id, identity.role);
        metrics.connection_established();

        Self {
            registry,
            handle,
            config,
            metrics,
            state: PumpState::Connecting,
            close_reason: None,
        }
    }

    pub fn state(&self) -> PumpState {
        self.state
    }

    pub fn connection_id(&self) -> ConnectionId {
        self.handle.connection_id()
    }

    /// Write the handshake, then relay until the peer leaves, a write fails or
    /// the queue is closed. Always releases the registration before returning.
    pub async fn run<T: EventTransport + ?Sized>(&mut self, transport: &T) -> CloseReason {
        if let Some(reason) = self.close_reason {
            return reason;
        }

        let reason = self.stream(transport).await;

        let released = self.registry.release(&self.handle);
        self.state = PumpState::Closed;
        self.close_reason = Some(reason);
        self.metrics.connection_closed(reason.as_str());

        info!(
            "Stream {} closed for user {} in tenant {}: {} (released: {})",
            self.handle.connection_id(),
            self.handle.user_id(),
            self.handle.tenant_id(),
            reason,
            released
        );

        reason
    }

    async fn stream<T: EventTransport + ?Sized>(&mut self, transport: &T) -> CloseReason {
        if let Err(e) = transport.write(frame::connected_frame()).await {
            warn!("Handshake failed on stream {}: {}", self.handle.connection_id(), e);
            return CloseReason::WriteFailed;
        }
        self.metrics.frame_sent("connected");
        self.state = PumpState::Streaming;
        debug!("Stream {} streaming", self.handle.connection_id());

        let mut keep_alive = self.config.keep_alive_interval().map(|period| {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker
        });

        loop {
            tokio::select! {
                message = self.handle.recv() => {
                    let Some(message) = message else {
                        return CloseReason::QueueClosed;
                    };
                    if let Err(e) = transport.write(frame::data_frame(&message.payload)).await {
                        debug!("Write failed on stream {}: {}", self.handle.connection_id(), e);
                        return CloseReason::WriteFailed;
                    }
                    self.metrics.frame_sent(message.event_type);
                }

                _ = transport.closed() => {
                    return CloseReason::PeerClosed;
                }

                _ = next_tick(&mut keep_alive) => {
                    if let Err(e) = transport.write(frame::keep_alive_frame()).await {
                        debug!("Keep-alive failed on stream {}: {}", self.handle.connection_id(), e);
                        return CloseReason::WriteFailed;
                    }
                    self.metrics.frame_sent("keep_alive");
                }
            }
        }
    }
}

/// Never resolves when keep-alive is disabled
async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

pub mod broadcast_event;
pub mod broadcast_message;
pub mod broadcast_outcome;
pub mod client_handle;
pub mod client_registration;
pub mod close_reason;
pub mod connection_id;
pub mod connection_registry;
pub mod error;
pub mod frame;
pub mod metrics;
pub mod registry_config;
pub mod shutdown_coordinator;
pub mod shutdown_guard;
pub mod sse;
pub mod stream_pump;
pub mod transport;

pub use broadcast_event::{BroadcastEvent, SaleEvent};
pub use broadcast_message::BroadcastMessage;
pub use broadcast_outcome::BroadcastOutcome;
pub use client_handle::ClientHandle;
pub use client_registration::ClientRegistration;
pub use close_reason::CloseReason;
pub use connection_id::ConnectionId;
pub use connection_registry::ConnectionRegistry;
pub use error::{EventsError, Result};
pub use metrics::Metrics;
pub use registry_config::RegistryConfig;
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;
pub use sse::open_event_stream;
pub use stream_pump::{PumpState, StreamPump};
pub use transport::{ChannelTransport, EventTransport};

#[cfg(test)]
mod tests;

use inv_core::{TenantId, UserId};

use tracing::info_span;

/// Tracing span wrapped around one stream's pump task.
/// Only tracing subscribers see its fields; `log` lines name the connection id themselves.
pub fn create_stream_span(
    connection_id: ConnectionId,
    tenant_id: TenantId,
    user_id: UserId,
) -> tracing::Span {
    info_span!(
        "event_stream",
        connection_id = %connection_id,
        tenant_id = %tenant_id,
        user_id = %user_id,
    )
}

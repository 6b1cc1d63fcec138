use crate::{
    ChannelTransport, ConnectionRegistry, EventsError, Metrics, Result as EventsErrorResult,
    StreamPump, create_stream_span,
};

use inv_auth::IdentityContext;
use inv_config::StreamConfig;

use std::panic::Location;

use axum::body::Body;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::Response;
use error_location::ErrorLocation;
use tracing::Instrument;

pub const EVENT_STREAM_CONTENT_TYPE: &str = "text/event-stream";

/// Open a sale event stream for an authenticated caller.
///
/// Non-privileged callers are rejected before anything is registered. The
/// registration happens before the response is returned, so events broadcast
/// after this call are never missed by the new stream.
pub fn open_event_stream(
    registry: &ConnectionRegistry,
    identity: &IdentityContext,
    config: &StreamConfig,
    metrics: &Metrics,
) -> EventsErrorResult<Response> {
    if !identity.is_privileged() {
        return Err(EventsError::Forbidden {
            role: identity.role.to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let (transport, receiver) = ChannelTransport::new(config.transport_buffer);
    let mut pump = StreamPump::connect(
        registry.clone(),
        identity,
        config.clone(),
        metrics.clone(),
    );
    let span = create_stream_span(pump.connection_id(), identity.tenant_id, identity.user_id);

    tokio::spawn(
        async move {
            pump.run(&transport).await;
        }
        .instrument(span),
    );

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, EVENT_STREAM_CONTENT_TYPE)
        .header(header::CACHE_CONTROL, "no-cache")
        .header(header::CONNECTION, "keep-alive")
        .header("x-accel-buffering", HeaderValue::from_static("no"))
        .body(Body::from_stream(ChannelTransport::into_stream(receiver)))
        .map_err(|e| EventsError::Internal {
            message: format!("Failed to build event stream response: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
}

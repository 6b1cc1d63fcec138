use crate::tests::{frame_json, identity, sale_event};
use crate::{ConnectionRegistry, EventsError, Metrics, open_event_stream};

use inv_config::StreamConfig;
use inv_core::{Role, TenantId, UserId};

use std::time::Duration;

use axum::body::Body;
use axum::http::{StatusCode, header};
use googletest::assert_that;
use googletest::prelude::{eq, some};
use http_body_util::BodyExt;
use tokio::time::timeout;

async fn next_frame(body: &mut Body) -> bytes::Bytes {
    let frame = timeout(Duration::from_secs(5), body.frame())
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    frame.into_data().unwrap()
}

#[tokio::test]
async fn given_standard_user_when_opening_stream_then_forbidden_and_not_registered() {
    // Given
    let registry = ConnectionRegistry::default();

    // When
    let result = open_event_stream(
        &registry,
        &identity(7, 3, Role::User),
        &StreamConfig::default(),
        &Metrics::new(),
    );

    // Then
    assert!(matches!(result, Err(EventsError::Forbidden { .. })));
    assert_that!(registry.total_count(), eq(0));
}

#[tokio::test]
async fn given_super_admin_when_opening_stream_then_event_stream_headers() {
    // Given
    let registry = ConnectionRegistry::default();

    // When
    let response = open_event_stream(
        &registry,
        &identity(7, 1, Role::SuperAdmin),
        &StreamConfig::default(),
        &Metrics::new(),
    )
    .unwrap();

    // Then
    assert_that!(response.status(), eq(StatusCode::OK));
    let headers = response.headers();
    assert_that!(
        headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
        some(eq("text/event-stream"))
    );
    assert_that!(
        headers.get(header::CACHE_CONTROL).and_then(|v| v.to_str().ok()),
        some(eq("no-cache"))
    );
    assert_that!(
        headers.get("x-accel-buffering").and_then(|v| v.to_str().ok()),
        some(eq("no"))
    );
    assert_that!(registry.is_registered(TenantId(7), UserId(1)), eq(true));
}

#[tokio::test]
async fn given_open_stream_when_sale_broadcast_then_body_yields_handshake_then_event() {
    // Given
    let registry = ConnectionRegistry::default();
    let response = open_event_stream(
        &registry,
        &identity(7, 1, Role::SuperAdmin),
        &StreamConfig::default(),
        &Metrics::new(),
    )
    .unwrap();
    let mut body = response.into_body();

    // When
    let handshake = next_frame(&mut body).await;
    registry.broadcast(TenantId(7), &sale_event(42));
    let event = next_frame(&mut body).await;

    // Then
    assert_that!(frame_json(&handshake)["type"].as_str(), some(eq("connected")));
    assert_that!(frame_json(&event)["type"].as_str(), some(eq("new_sale")));
    assert_that!(frame_json(&event)["saleId"].as_i64(), some(eq(42)));
}

#[tokio::test]
async fn given_open_stream_when_body_dropped_then_unregistered() {
    // Given
    let registry = ConnectionRegistry::default();
    let response = open_event_stream(
        &registry,
        &identity(7, 1, Role::SuperAdmin),
        &StreamConfig::default(),
        &Metrics::new(),
    )
    .unwrap();

    // When: The client disconnects
    drop(response);

    // Then
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while registry.total_count() > 0 && tokio::time::Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_that!(registry.total_count(), eq(0));
}

mod sse;

use crate::{BroadcastEvent, EventTransport, EventsError, Result as EventsErrorResult, SaleEvent};

use inv_auth::IdentityContext;
use inv_core::{Role, TenantId, UserId};

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;

pub(crate) fn identity(tenant: i64, user: i64, role: Role) -> IdentityContext {
    IdentityContext::new(UserId(user), TenantId(tenant), role)
}

pub(crate) fn sale_event(sale_id: i64) -> BroadcastEvent {
    BroadcastEvent::NewSale(SaleEvent {
        sale_id,
        product_name: String::from("Widget"),
        quantity: 3,
        total_price: 150.0,
        currency: String::from("USD"),
        seller_name: String::from("Sam Seller"),
        branch_name: String::new(),
        title: String::from("Sale Recorded"),
        message: String::from("Recorded sale of 3 units of Widget for USD 150.00"),
        created_at: String::from("2026-01-15T10:30:00Z"),
    })
}

/// Parse a `data: <json>\n\n` frame back into JSON
pub(crate) fn frame_json(frame: &[u8]) -> serde_json::Value {
    let text = std::str::from_utf8(frame).unwrap();
    let json = text
        .strip_prefix("data: ")
        .and_then(|rest| rest.strip_suffix("\n\n"))
        .unwrap();
    serde_json::from_str(json).unwrap()
}

/// Records frames and fails every write after the first `accept` ones.
/// Never reports the peer as closed.
pub(crate) struct RecordingTransport {
    accept: usize,
    written: AtomicUsize,
    pub(crate) frames: Mutex<Vec<Bytes>>,
}

impl RecordingTransport {
    pub(crate) fn accepting(accept: usize) -> Self {
        Self {
            accept,
            written: AtomicUsize::new(0),
            frames: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn frames(&self) -> Vec<Bytes> {
        self.frames.lock().clone()
    }
}

#[async_trait]
impl EventTransport for RecordingTransport {
    async fn write(&self, frame: Bytes) -> EventsErrorResult<()> {
        if self.written.fetch_add(1, Ordering::SeqCst) >= self.accept {
            return Err(EventsError::transport_closed());
        }
        self.frames.lock().push(frame);
        Ok(())
    }

    async fn closed(&self) {
        std::future::pending::<()>().await
    }
}

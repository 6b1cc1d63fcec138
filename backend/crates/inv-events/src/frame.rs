//! text/event-stream framing.

use bytes::{BufMut, Bytes, BytesMut};

pub const CONNECTED_PAYLOAD: &str = r#"{"type":"connected"}"#;

const DATA_PREFIX: &[u8] = b"data: ";
const FRAME_END: &[u8] = b"\n\n";
const KEEP_ALIVE: &[u8] = b": keep-alive\n\n";

/// `data: <payload>\n\n`. The payload must not contain newlines (compact JSON).
pub fn data_frame(payload: &[u8]) -> Bytes {
    let mut frame = BytesMut::with_capacity(DATA_PREFIX.len() + payload.len() + FRAME_END.len());
    frame.put_slice(DATA_PREFIX);
    frame.put_slice(payload);
    frame.put_slice(FRAME_END);
    frame.freeze()
}

/// Handshake sent once the stream is registered
pub fn connected_frame() -> Bytes {
    data_frame(CONNECTED_PAYLOAD.as_bytes())
}

/// SSE comment; clients ignore it
pub fn keep_alive_frame() -> Bytes {
    Bytes::from_static(KEEP_ALIVE)
}

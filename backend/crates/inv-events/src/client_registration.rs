use crate::{BroadcastMessage, ConnectionId};

use inv_core::Role;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

/// Registry-side half of one live stream.
///
/// Holds the only sender of the client's queue; dropping the registration
/// closes the queue.
#[derive(Debug)]
pub struct ClientRegistration {
    pub connection_id: ConnectionId,
    pub role: Role,
    pub connected_at: DateTime<Utc>,
    pub(crate) sender: mpsc::Sender<BroadcastMessage>,
}

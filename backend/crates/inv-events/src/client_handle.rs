use crate::{BroadcastMessage, ConnectionId};

use inv_core::{Role, TenantId, UserId};

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

/// Read side of a client's queue, returned by `ConnectionRegistry::register`.
#[derive(Debug)]
pub struct ClientHandle {
    connection_id: ConnectionId,
    tenant_id: TenantId,
    user_id: UserId,
    role: Role,
    receiver: mpsc::Receiver<BroadcastMessage>,
}

impl ClientHandle {
    pub(crate) fn new(
        connection_id: ConnectionId,
        tenant_id: TenantId,
        user_id: UserId,
        role: Role,
        receiver: mpsc::Receiver<BroadcastMessage>,
    ) -> Self {
        Self {
            connection_id,
            tenant_id,
            user_id,
            role,
            receiver,
        }
    }

    pub fn connection_id(&self) -> ConnectionId {
        self.connection_id
    }

    pub fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Next queued message. `None` once the registration was removed and the
    /// queue is drained.
    pub async fn recv(&mut self) -> Option<BroadcastMessage> {
        self.receiver.recv().await
    }

    pub fn try_recv(&mut self) -> Result<BroadcastMessage, TryRecvError> {
        self.receiver.try_recv()
    }

    /// True once the registry dropped this client's queue
    pub fn is_closed(&self) -> bool {
        self.receiver.is_closed()
    }
}

use crate::{
    BroadcastEvent, BroadcastMessage, BroadcastOutcome, ClientHandle, ClientRegistration,
    ConnectionId, RegistryConfig,
};

use inv_core::{Role, TenantId, UserId};

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use log::{debug, error, info, warn};
use parking_lot::RwLock;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Live event streams, partitioned by tenant then by client.
///
/// At most one registration exists per (tenant, client). Every queue is
/// owned here; a stream pump only holds the receiving half of its own.
/// No lock is ever held across an await.
pub struct ConnectionRegistry {
    inner: Arc<RwLock<RegistryInner>>,
    config: RegistryConfig,
}

#[derive(Default)]
struct RegistryInner {
    /// Partitions are created on first register and removed when emptied
    tenants: HashMap<TenantId, HashMap<UserId, ClientRegistration>>,
    /// Set by `close_all`; later registrations get an already-closed queue
    closed: bool,
}

impl ConnectionRegistry {
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(RegistryInner::default())),
            config,
        }
    }

    /// Register a client with a fresh queue.
    ///
    /// An existing registration for the same (tenant, client) is closed first,
    /// so its pump observes a closed queue and exits.
    pub fn register(&self, tenant_id: TenantId, user_id: UserId, role: Role) -> ClientHandle {
        let (sender, receiver) = mpsc::channel(self.config.queue_capacity.max(1));
        let connection_id = ConnectionId::new();
        let registration = ClientRegistration {
            connection_id,
            role,
            connected_at: chrono::Utc::now(),
            sender,
        };

        let mut inner = self.inner.write();

        if inner.closed {
            info!(
                "Registry closed, stream {connection_id} for user {user_id} in tenant {tenant_id} not registered"
            );
            drop(registration);
            return ClientHandle::new(connection_id, tenant_id, user_id, role, receiver);
        }

        let partition = inner.tenants.entry(tenant_id).or_default();

        if let Some(previous) = partition.remove(&user_id) {
            info!(
                "Superseding stream {} for user {} in tenant {}",
                previous.connection_id, user_id, tenant_id
            );
            drop(previous);
        }

        partition.insert(user_id, registration);
        info!(
            "Registered stream {connection_id} for user {user_id} ({role}) in tenant {tenant_id} ({} in tenant)",
            partition.len()
        );

        ClientHandle::new(connection_id, tenant_id, user_id, role, receiver)
    }

    /// Remove a client and close its queue. Returns false when nothing was registered.
    pub fn unregister(&self, tenant_id: TenantId, user_id: UserId) -> bool {
        self.remove_if(tenant_id, user_id, |_| true)
    }

    /// Unregister only if `handle` is still the current registration.
    ///
    /// A pump that was superseded must not remove its successor.
    pub fn release(&self, handle: &ClientHandle) -> bool {
        let connection_id = handle.connection_id();
        self.remove_if(handle.tenant_id(), handle.user_id(), |registration| {
            registration.connection_id == connection_id
        })
    }

    fn remove_if(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        matches: impl FnOnce(&ClientRegistration) -> bool,
    ) -> bool {
        let mut inner = self.inner.write();

        let Some(partition) = inner.tenants.get_mut(&tenant_id) else {
            return false;
        };

        if !partition.get(&user_id).is_some_and(matches) {
            return false;
        }

        let removed = partition.remove(&user_id);
        let remaining = partition.len();
        if remaining == 0 {
            inner.tenants.remove(&tenant_id);
        }

        if let Some(registration) = removed {
            let lifetime = chrono::Utc::now() - registration.connected_at;
            debug!(
                "Unregistered stream {} for user {} in tenant {} after {}s ({} remaining in tenant)",
                registration.connection_id,
                user_id,
                tenant_id,
                lifetime.num_seconds(),
                remaining
            );
        }

        true
    }

    /// Queue `event` for every privileged client of `tenant_id`.
    ///
    /// Serializes once and never blocks: a client whose queue is full misses
    /// this event. Other tenants and non-privileged clients are untouched.
    pub fn broadcast(&self, tenant_id: TenantId, event: &BroadcastEvent) -> BroadcastOutcome {
        let payload = match serde_json::to_vec(event) {
            Ok(payload) => Bytes::from(payload),
            Err(e) => {
                error!(
                    "Failed to serialize {} event for tenant {}: {}",
                    event.event_type(),
                    tenant_id,
                    e
                );
                return BroadcastOutcome::default();
            }
        };
        let message = BroadcastMessage::new(payload, event.event_type());

        let mut outcome = BroadcastOutcome::default();
        let inner = self.inner.read();

        let Some(partition) = inner.tenants.get(&tenant_id) else {
            debug!("No streams for tenant {}, {} not sent", tenant_id, message.event_type);
            return outcome;
        };

        for (user_id, registration) in partition {
            if !registration.role.is_privileged() {
                continue;
            }

            match registration.sender.try_send(message.clone()) {
                Ok(()) => outcome.delivered += 1,
                Err(TrySendError::Full(_)) => {
                    warn!(
                        "Queue full for user {} in tenant {}, dropping {} event",
                        user_id, tenant_id, message.event_type
                    );
                    outcome.dropped += 1;
                }
                Err(TrySendError::Closed(_)) => {
                    // Pump already gone, release pending
                    debug!(
                        "Queue closed for user {} in tenant {}, skipping {} event",
                        user_id, tenant_id, message.event_type
                    );
                    outcome.dropped += 1;
                }
            }
        }

        outcome
    }

    /// Close every queue and stop accepting registrations. Used on shutdown;
    /// returns how many were closed.
    pub fn close_all(&self) -> usize {
        let mut inner = self.inner.write();
        inner.closed = true;
        let closed = inner.tenants.values().map(HashMap::len).sum();
        inner.tenants.clear();

        if closed > 0 {
            info!("Closed {} event streams", closed);
        }

        closed
    }

    pub fn is_registered(&self, tenant_id: TenantId, user_id: UserId) -> bool {
        self.inner
            .read()
            .tenants
            .get(&tenant_id)
            .is_some_and(|partition| partition.contains_key(&user_id))
    }

    pub fn client_count(&self, tenant_id: TenantId) -> usize {
        self.inner
            .read()
            .tenants
            .get(&tenant_id)
            .map_or(0, HashMap::len)
    }

    /// True once `close_all` has run
    pub fn is_closed(&self) -> bool {
        self.inner.read().closed
    }

    pub fn tenant_count(&self) -> usize {
        self.inner.read().tenants.len()
    }

    pub fn total_count(&self) -> usize {
        self.inner.read().tenants.values().map(HashMap::len).sum()
    }

    pub fn config(&self) -> RegistryConfig {
        self.config
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}

impl Clone for ConnectionRegistry {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            config: self.config,
        }
    }
}

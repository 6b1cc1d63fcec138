use crate::{ConnectionRegistry, ShutdownGuard};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::broadcast;

/// Graceful shutdown coordinator.
///
/// Shutting down closes every registered queue, so each stream pump exits
/// through its normal queue-closed path.
#[derive(Clone)]
pub struct ShutdownCoordinator {
    shutdown_tx: broadcast::Sender<()>,
    triggered: Arc<AtomicBool>,
    registry: ConnectionRegistry,
}

impl ShutdownCoordinator {
    pub fn new(registry: ConnectionRegistry) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        Self {
            shutdown_tx,
            triggered: Arc::new(AtomicBool::new(false)),
            registry,
        }
    }

    /// Get a receiver for shutdown notifications
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Trigger shutdown (call this from signal handler). Idempotent.
    pub fn shutdown(&self) {
        if self.triggered.swap(true, Ordering::SeqCst) {
            return;
        }

        log::info!("Shutdown signal received, notifying all subsystems");
        let _ = self.shutdown_tx.send(());

        let closed = self.registry.close_all();
        log::info!("Closed {} event streams for shutdown", closed);
    }

    pub fn is_shutdown(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }

    /// Convenience method to create a guard
    pub fn subscribe_guard(&self) -> ShutdownGuard {
        ShutdownGuard::new(self)
    }
}

use inv_config::StreamConfig;

/// Pending messages a client may have queued before new ones are dropped
pub const DEFAULT_QUEUE_CAPACITY: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryConfig {
    pub queue_capacity: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl From<&StreamConfig> for RegistryConfig {
    fn from(config: &StreamConfig) -> Self {
        Self {
            // mpsc::channel panics on zero
            queue_capacity: config.queue_capacity.max(1),
        }
    }
}

use crate::{ConfigError, ConfigErrorResult};

use std::time::Duration;

use serde::Deserialize;

// Per-client queue capacity constraints
pub const MIN_QUEUE_CAPACITY: usize = 1;
pub const MAX_QUEUE_CAPACITY: usize = 1000;
pub const DEFAULT_QUEUE_CAPACITY: usize = 10;

// Frames buffered between the pump and the HTTP response body
pub const MIN_TRANSPORT_BUFFER: usize = 1;
pub const MAX_TRANSPORT_BUFFER: usize = 1024;
pub const DEFAULT_TRANSPORT_BUFFER: usize = 16;

// Keep-alive interval constraints (seconds), 0 disables
pub const MIN_KEEP_ALIVE_SECS: u64 = 5;
pub const MAX_KEEP_ALIVE_SECS: u64 = 300;
pub const DEFAULT_KEEP_ALIVE_SECS: u64 = 15;

/// Sale event stream settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Pending messages per client before new ones are dropped
    pub queue_capacity: usize,
    pub transport_buffer: usize,
    pub keep_alive_secs: u64,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            transport_buffer: DEFAULT_TRANSPORT_BUFFER,
            keep_alive_secs: DEFAULT_KEEP_ALIVE_SECS,
        }
    }
}

impl StreamConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.queue_capacity < MIN_QUEUE_CAPACITY || self.queue_capacity > MAX_QUEUE_CAPACITY {
            return Err(ConfigError::stream(format!(
                "stream.queue_capacity must be {}-{}, got {}",
                MIN_QUEUE_CAPACITY, MAX_QUEUE_CAPACITY, self.queue_capacity
            )));
        }

        if self.transport_buffer < MIN_TRANSPORT_BUFFER
            || self.transport_buffer > MAX_TRANSPORT_BUFFER
        {
            return Err(ConfigError::stream(format!(
                "stream.transport_buffer must be {}-{}, got {}",
                MIN_TRANSPORT_BUFFER, MAX_TRANSPORT_BUFFER, self.transport_buffer
            )));
        }

        if self.keep_alive_secs != 0
            && (self.keep_alive_secs < MIN_KEEP_ALIVE_SECS
                || self.keep_alive_secs > MAX_KEEP_ALIVE_SECS)
        {
            return Err(ConfigError::stream(format!(
                "stream.keep_alive_secs must be 0 (disabled) or {}-{}, got {}",
                MIN_KEEP_ALIVE_SECS, MAX_KEEP_ALIVE_SECS, self.keep_alive_secs
            )));
        }

        Ok(())
    }

    pub fn keep_alive_interval(&self) -> Option<Duration> {
        (self.keep_alive_secs > 0).then(|| Duration::from_secs(self.keep_alive_secs))
    }
}

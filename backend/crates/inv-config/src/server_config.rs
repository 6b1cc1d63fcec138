use crate::{ConfigError, ConfigErrorResult, DEFAULT_CORS_ORIGIN, DEFAULT_HOST, DEFAULT_PORT, MIN_PORT};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins; "*" allows any origin
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_HOST),
            port: DEFAULT_PORT,
            cors_allowed_origins: vec![String::from(DEFAULT_CORS_ORIGIN)],
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        // Port 0 means "auto-assign"
        if self.port != 0 && self.port < MIN_PORT {
            return Err(ConfigError::config(format!(
                "server.port must be 0 (auto) or >= {}, got {}",
                MIN_PORT, self.port
            )));
        }

        if self.cors_allowed_origins.iter().any(|o| o.trim().is_empty()) {
            return Err(ConfigError::config(
                "server.cors_allowed_origins cannot contain empty entries",
            ));
        }

        Ok(())
    }

    /// True when any origin is allowed (empty list or "*")
    pub fn allows_any_origin(&self) -> bool {
        self.cors_allowed_origins.is_empty()
            || self
                .cors_allowed_origins
                .iter()
                .any(|o| o == DEFAULT_CORS_ORIGIN)
    }
}

use crate::{ConfigError, ConfigErrorResult};

use std::path::Path;

use serde::Deserialize;

/// Minimum HS256 secret length in bytes
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 shared secret
    pub jwt_secret: Option<String>,
    /// RS256 public key (PEM), relative to the config dir
    pub jwt_public_key_path: Option<String>,
}

impl AuthConfig {
    pub fn validate(&self, config_dir: &Path) -> ConfigErrorResult<()> {
        match (&self.jwt_secret, &self.jwt_public_key_path) {
            (None, None) => Err(ConfigError::auth(
                "either auth.jwt_secret or auth.jwt_public_key_path must be set",
            )),
            (Some(secret), _) => {
                if self.jwt_public_key_path.is_some() {
                    log::warn!("Both jwt_secret and jwt_public_key_path provided, using jwt_secret (HS256)");
                }
                if secret.len() < MIN_JWT_SECRET_LENGTH {
                    return Err(ConfigError::auth(format!(
                        "auth.jwt_secret must be at least {} bytes",
                        MIN_JWT_SECRET_LENGTH
                    )));
                }
                Ok(())
            }
            (None, Some(key_path)) => {
                if key_path.contains("..") {
                    return Err(ConfigError::auth(
                        "auth.jwt_public_key_path cannot contain '..'",
                    ));
                }
                let full_path = config_dir.join(key_path);
                if !full_path.exists() {
                    return Err(ConfigError::auth(format!(
                        "JWT public key not found: {}",
                        full_path.display()
                    )));
                }
                Ok(())
            }
        }
    }
}

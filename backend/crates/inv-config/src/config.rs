use crate::{
    AuthConfig, CONFIG_DIR_ENV, ConfigError, ConfigErrorResult, DEFAULT_CONFIG_DIRECTORY,
    DatabaseConfig, LoggingConfig, ServerConfig, StreamConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
    pub stream: StreamConfig,
}

impl Config {
    /// Load `.env.<ENV>` (falling back to `.env`) into the process environment.
    ///
    /// Missing files are not an error. Returns the file that was loaded, if any.
    pub fn load_dotenv() -> Option<PathBuf> {
        let env_name = std::env::var("ENV").unwrap_or_else(|_| String::from("development"));

        dotenvy::from_filename(format!(".env.{}", env_name))
            .or_else(|_| dotenvy::dotenv())
            .ok()
    }

    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for INV_CONFIG_DIR env var, else use ./.inv/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply legacy PORT / JWT_SECRET / CORS_ALLOWED_ORIGINS overrides
    /// 5. Apply INV_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join("config.toml");

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_legacy_env_overrides();
        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: INV_CONFIG_DIR env var > ./.inv/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIRECTORY))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let config_dir = Self::config_dir()?;

        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&config_dir)?;
        self.stream.validate()?;

        Ok(())
    }

    pub fn database_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.database.path))
    }

    pub fn jwt_public_key_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        let config_dir = Self::config_dir()?;
        Ok(self
            .auth
            .jwt_public_key_path
            .as_ref()
            .map(|p| config_dir.join(p)))
    }

    /// Log file path, None when logging to stdout
    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        let config_dir = Self::config_dir()?;
        Ok(self
            .logging
            .file
            .as_ref()
            .map(|f| config_dir.join(&self.logging.dir).join(f)))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  server: {}", self.bind_addr());
        info!(
            "  cors: {}",
            if self.server.allows_any_origin() {
                String::from("any origin")
            } else {
                self.server.cors_allowed_origins.join(", ")
            }
        );
        info!(
            "  database: {} (max {} connections)",
            self.database.path, self.database.max_connections
        );

        let auth_type = if self.auth.jwt_secret.is_some() {
            "HS256"
        } else if self.auth.jwt_public_key_path.is_some() {
            "RS256"
        } else {
            "none"
        };
        info!("  auth: {}", auth_type);

        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );

        info!(
            "  stream: queue={}, buffer={}, keep_alive={}s",
            self.stream.queue_capacity, self.stream.transport_buffer, self.stream.keep_alive_secs
        );
    }

    /// Unprefixed variables from older deployments
    fn apply_legacy_env_overrides(&mut self) {
        Self::apply_env_parse("PORT", &mut self.server.port);
        Self::apply_env_option_string("JWT_SECRET", &mut self.auth.jwt_secret);
        Self::apply_env_list("CORS_ALLOWED_ORIGINS", &mut self.server.cors_allowed_origins);
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("INV_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("INV_SERVER_PORT", &mut self.server.port);
        Self::apply_env_list(
            "INV_SERVER_CORS_ALLOWED_ORIGINS",
            &mut self.server.cors_allowed_origins,
        );

        // Database
        Self::apply_env_string("INV_DATABASE_PATH", &mut self.database.path);
        Self::apply_env_parse(
            "INV_DATABASE_MAX_CONNECTIONS",
            &mut self.database.max_connections,
        );

        // Auth
        Self::apply_env_option_string("INV_AUTH_JWT_SECRET", &mut self.auth.jwt_secret);
        Self::apply_env_option_string(
            "INV_AUTH_JWT_PUBLIC_KEY_PATH",
            &mut self.auth.jwt_public_key_path,
        );

        // Logging
        Self::apply_env_parse("INV_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("INV_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_string("INV_LOG_DIR", &mut self.logging.dir);
        Self::apply_env_option_string("INV_LOG_FILE", &mut self.logging.file);

        // Stream
        Self::apply_env_parse(
            "INV_STREAM_QUEUE_CAPACITY",
            &mut self.stream.queue_capacity,
        );
        Self::apply_env_parse(
            "INV_STREAM_TRANSPORT_BUFFER",
            &mut self.stream.transport_buffer,
        );
        Self::apply_env_parse(
            "INV_STREAM_KEEP_ALIVE_SECS",
            &mut self.stream.keep_alive_secs,
        );
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }

    /// Helper: Comma-separated list, blank entries skipped
    fn apply_env_list(var_name: &str, target: &mut Vec<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
    }
}

use inv_server::{AppState, ServerError, build_router, logger};

use inv_auth::JwtValidator;
use inv_config::{Config, ConfigError};
use inv_events::{ConnectionRegistry, Metrics, RegistryConfig, ShutdownCoordinator};

use std::error::Error;
use std::sync::Arc;

use log::{error, info, warn};
use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Environment files first so they can feed INV_* overrides
    let dotenv_file = Config::load_dotenv();

    // Load and validate configuration
    let config = Config::load()?;
    config.validate()?;

    // Initialize logger (before any other logging)
    logger::initialize(
        config.logging.level,
        config.log_file_path()?,
        config.logging.colored,
    )?;

    info!("Starting inv-server v{}", env!("CARGO_PKG_VERSION"));
    if let Some(path) = dotenv_file {
        info!("Loaded environment from {}", path.display());
    }
    config.log_summary();

    // Prometheus recorder backing the /metrics endpoint
    let prometheus = match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("Failed to install Prometheus recorder, /metrics disabled: {}", e);
            None
        }
    };

    // Initialize database pool (runs migrations)
    let database_path = config.database_path()?;
    info!("Connecting to database: {}", database_path.display());
    let pool = inv_db::connect(&database_path, config.database.max_connections).await?;
    info!("Database ready");

    let jwt_validator = Arc::new(build_jwt_validator(&config)?);

    // Event fan-out
    let registry = ConnectionRegistry::new(RegistryConfig::from(&config.stream));
    let metrics = Metrics::new();
    let shutdown = ShutdownCoordinator::new(registry.clone());

    // Build application state
    let app_state = AppState {
        pool,
        jwt_validator,
        registry,
        metrics,
        stream_config: config.stream.clone(),
        shutdown: shutdown.clone(),
        prometheus,
    };

    let app = build_router(app_state, &config.server);

    // Create TCP listener
    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;
    info!("Server listening on {}", listener.local_addr()?);

    // Subscribe before the signal task can fire
    let mut shutdown_guard = shutdown.subscribe_guard();

    // Spawn signal handler for graceful shutdown
    let shutdown_for_signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
                shutdown_for_signal.shutdown();
            }
            Err(e) => {
                error!("Failed to listen for SIGINT: {}", e);
            }
        }
    });

    // Start server with graceful shutdown
    info!("Server ready to accept connections");
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_guard.wait().await;
            info!("Graceful shutdown complete");
        })
        .await?;

    Ok(())
}

/// HS256 when a secret is configured, otherwise RS256 from the key file.
fn build_jwt_validator(config: &Config) -> Result<JwtValidator, ServerError> {
    if let Some(ref secret) = config.auth.jwt_secret {
        info!("JWT: HS256 authentication enabled");
        return Ok(JwtValidator::with_hs256(secret.as_bytes()));
    }

    let Some(key_path) = config.jwt_public_key_path()? else {
        return Err(ConfigError::auth("no JWT secret or public key configured").into());
    };

    let public_key =
        std::fs::read_to_string(&key_path).map_err(|e| ServerError::JwtKeyFile {
            path: key_path.display().to_string(),
            source: e,
        })?;
    info!("JWT: RS256 authentication enabled");

    Ok(JwtValidator::with_rs256(&public_key)?)
}

use inv_auth::JwtValidator;
use inv_config::StreamConfig;
use inv_events::{ConnectionRegistry, Metrics, ShutdownCoordinator};

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::SqlitePool;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub jwt_validator: Arc<JwtValidator>,
    pub registry: ConnectionRegistry,
    pub metrics: Metrics,
    pub stream_config: StreamConfig,
    pub shutdown: ShutdownCoordinator,
    /// None when no Prometheus recorder is installed (tests)
    pub prometheus: Option<PrometheusHandle>,
}

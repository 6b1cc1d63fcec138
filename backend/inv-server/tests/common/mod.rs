#![allow(dead_code)]

//! Test infrastructure for inv-server API tests

use inv_auth::{Claims, JwtValidator};
use inv_config::{ServerConfig, StreamConfig};
use inv_core::Role;
use inv_events::{ConnectionRegistry, Metrics, RegistryConfig, ShutdownCoordinator};
use inv_server::{AppState, build_router};

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, header},
};
use http_body_util::BodyExt;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub const TEST_SECRET: &str = "test-secret-key-at-least-32-bytes";

/// How long a test waits for a frame that should arrive
pub const FRAME_TIMEOUT: Duration = Duration::from_secs(2);

/// Create a test pool with in-memory SQLite
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1) // In-memory needs single connection
        .connect_with(options)
        .await
        .expect("Failed to create test database");

    inv_db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Create AppState for testing (no Prometheus recorder)
pub async fn create_test_app_state() -> AppState {
    let pool = create_test_pool().await;
    let registry = ConnectionRegistry::new(RegistryConfig::default());
    let shutdown = ShutdownCoordinator::new(registry.clone());

    AppState {
        pool,
        jwt_validator: Arc::new(JwtValidator::with_hs256(TEST_SECRET.as_bytes())),
        registry,
        metrics: Metrics::new(),
        stream_config: StreamConfig::default(),
        shutdown,
        prometheus: None,
    }
}

pub fn test_router(state: AppState) -> Router {
    build_router(state, &ServerConfig::default())
}

pub fn claims_for(user_id: i64, company_id: i64, role: Role, username: &str) -> Claims {
    let now = chrono::Utc::now().timestamp();
    Claims {
        sub: user_id.to_string(),
        company_id,
        role,
        username: username.to_string(),
        exp: now + 3600,
        iat: now,
    }
}

pub fn sign(claims: &Claims, secret: &str) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Failed to sign test token")
}

/// Signed HS256 token for the given identity
pub fn token_for(user_id: i64, company_id: i64, role: Role) -> String {
    sign(
        &claims_for(user_id, company_id, role, &format!("user{}", user_id)),
        TEST_SECRET,
    )
}

/// Inserts a company, a branch and a user in that branch; returns (company_id, user_id)
pub async fn create_test_seller(
    pool: &SqlitePool,
    branch_name: &str,
    name: &str,
    username: &str,
) -> (i64, i64) {
    let company_id = sqlx::query("INSERT INTO companies (name, created_at) VALUES ('Acme', 0)")
        .execute(pool)
        .await
        .expect("Failed to create test company")
        .last_insert_rowid();

    let branch_id =
        sqlx::query("INSERT INTO branches (company_id, name, created_at) VALUES (?, ?, 0)")
            .bind(company_id)
            .bind(branch_name)
            .execute(pool)
            .await
            .expect("Failed to create test branch")
            .last_insert_rowid();

    let user_id = sqlx::query(
        "INSERT INTO users (name, username, role, branch_id, created_at) VALUES (?, ?, 'user', ?, 0)",
    )
    .bind(name)
    .bind(username)
    .bind(branch_id)
    .execute(pool)
    .await
    .expect("Failed to create test user")
    .last_insert_rowid();

    (company_id, user_id)
}

/// A valid sale body: 3 x Widget at 50.00 USD
pub fn new_sale_body() -> serde_json::Value {
    serde_json::json!({
        "productId": 11,
        "productName": "Widget",
        "productAttributes": { "color": "red" },
        "quantity": 3,
        "unitPrice": 50.0,
        "totalPrice": 150.0,
        "currency": "USD",
        "paymentStatus": "credit",
        "buyerName": "Jane Buyer"
    })
}

pub fn authorized(method: &str, uri: &str, token: &str) -> axum::http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
}

pub fn post_sale(token: &str, body: &serde_json::Value) -> Request<Body> {
    authorized("POST", "/api/v1/sales", token)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn open_stream(token: &str) -> Request<Body> {
    authorized("GET", "/api/v1/sales/events", token)
        .body(Body::empty())
        .unwrap()
}

pub async fn json_body(body: Body) -> serde_json::Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Next `data:` frame of an event stream, parsed as JSON.
/// None when the stream ended.
pub async fn next_event(body: &mut Body) -> Option<serde_json::Value> {
    loop {
        let frame = body.frame().await?.expect("stream body error");
        let Ok(data) = frame.into_data() else {
            continue;
        };
        let text = std::str::from_utf8(&data).expect("frame is not UTF-8");

        // Skip keep-alive comments
        if let Some(json) = text.strip_prefix("data: ") {
            let json = json.strip_suffix("\n\n").expect("frame not terminated");
            return Some(serde_json::from_str(json).expect("frame is not JSON"));
        }
    }
}

/// Waits for the next event frame, panicking if none arrives in time
pub async fn expect_event(body: &mut Body) -> serde_json::Value {
    tokio::time::timeout(FRAME_TIMEOUT, next_event(body))
        .await
        .expect("timed out waiting for event frame")
        .expect("stream ended before an event arrived")
}

use crate::ApiError;

use inv_auth::AuthError;
use inv_core::CoreError;
use inv_db::DbError;
use inv_events::EventsError;

use std::panic::Location;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use error_location::ErrorLocation;
use googletest::prelude::*;
use http_body_util::BodyExt;

async fn into_json(error: ApiError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn given_not_found_when_rendered_then_404_with_flat_json_body() {
    // Given
    let error = ApiError::not_found("Sale 9 not found");

    // When
    let (status, json) = into_json(error).await;

    // Then
    assert_that!(status, eq(StatusCode::NOT_FOUND));
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Sale 9 not found");
    assert!(json.get("field").is_none());
}

#[tokio::test]
async fn given_core_validation_error_when_converted_then_400_with_field() {
    // Given
    let error = ApiError::from(CoreError::Validation {
        message: "quantity must be greater than zero".into(),
        field: Some("quantity".into()),
        location: ErrorLocation::from(Location::caller()),
    });

    // When
    let (status, json) = into_json(error).await;

    // Then
    assert_that!(status, eq(StatusCode::BAD_REQUEST));
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["field"], "quantity");
}

#[tokio::test]
async fn given_expired_token_when_converted_then_401_without_location_details() {
    // Given
    let error = ApiError::from(AuthError::TokenExpired {
        location: ErrorLocation::from(Location::caller()),
    });

    // When
    let (status, json) = into_json(error).await;

    // Then
    assert_that!(status, eq(StatusCode::UNAUTHORIZED));
    assert_eq!(json["code"], "TOKEN_EXPIRED");
    assert_eq!(json["error"], "invalid or expired token");
}

#[tokio::test]
async fn given_missing_header_when_converted_then_missing_auth_header_code() {
    // Given
    let error = ApiError::from(AuthError::MissingHeader {
        location: ErrorLocation::from(Location::caller()),
    });

    // When
    let (status, json) = into_json(error).await;

    // Then
    assert_that!(status, eq(StatusCode::UNAUTHORIZED));
    assert_eq!(json["code"], "MISSING_AUTH_HEADER");
}

#[tokio::test]
async fn given_events_forbidden_when_converted_then_403() {
    // Given
    let error = ApiError::from(EventsError::Forbidden {
        role: "user".into(),
        location: ErrorLocation::from(Location::caller()),
    });

    // When
    let (status, json) = into_json(error).await;

    // Then
    assert_that!(status, eq(StatusCode::FORBIDDEN));
    assert_eq!(json["code"], "FORBIDDEN");
}

#[tokio::test]
async fn given_database_failure_when_converted_then_500_hides_details() {
    // Given
    let error = ApiError::from(DbError::Initialization {
        message: "disk I/O error at /var/lib/secret.db".into(),
        location: ErrorLocation::from(Location::caller()),
    });

    // When
    let (status, json) = into_json(error).await;

    // Then
    assert_that!(status, eq(StatusCode::INTERNAL_SERVER_ERROR));
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "Database operation failed");
}

#[tokio::test]
async fn given_row_not_found_when_converted_then_404() {
    // Given
    let error = ApiError::from(DbError::from(sqlx::Error::RowNotFound));

    // When
    let (status, _json) = into_json(error).await;

    // Then
    assert_that!(status, eq(StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn given_unavailable_when_rendered_then_503_with_service_unavailable_code() {
    // Given
    let error = ApiError::unavailable("Server is shutting down");

    // When
    let (status, json) = into_json(error).await;

    // Then
    assert_that!(status, eq(StatusCode::SERVICE_UNAVAILABLE));
    assert_eq!(json["code"], "SERVICE_UNAVAILABLE");
    assert_eq!(json["error"], "Server is shutting down");
}

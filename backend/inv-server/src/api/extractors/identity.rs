//! Axum extractor for bearer-token authentication

use crate::{ApiError, AppState};

use inv_auth::{IdentityContext, bearer_token};

use std::future::Future;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

/// Authenticated caller resolved from the `Authorization: Bearer` header.
///
/// Rejects the request with 401 before the handler runs when the header is
/// missing, malformed, or carries a token that fails validation.
pub struct Identity(pub IdentityContext);

impl FromRequestParts<AppState> for Identity {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            // Non-ASCII header values fail the scheme check
            let header = parts
                .headers
                .get(AUTHORIZATION)
                .map(|value| value.to_str().unwrap_or_default());

            let token = bearer_token(header)?;
            let identity = state.jwt_validator.identify(token)?;

            log::debug!(
                "Authenticated user {} (tenant {}, role {})",
                identity.user_id,
                identity.tenant_id,
                identity.role
            );

            Ok(Identity(identity))
        }
    }
}

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid token: {message} {location}")]
    InvalidToken {
        message: String,
        location: ErrorLocation,
    },

    #[error("Token expired {location}")]
    TokenExpired { location: ErrorLocation },

    #[error("Missing authorization header {location}")]
    MissingHeader { location: ErrorLocation },

    #[error("Invalid authorization scheme: expected 'Bearer' {location}")]
    InvalidScheme { location: ErrorLocation },

    #[error("Missing bearer token {location}")]
    MissingToken { location: ErrorLocation },

    #[error("JWT decode failed: {source} {location}")]
    JwtDecode {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },

    #[error("Invalid claim '{claim}': {message} {location}")]
    InvalidClaim {
        claim: String,
        message: String,
        location: ErrorLocation,
    },
}

impl AuthError {
    /// Stable code returned to HTTP clients
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidToken { .. } => "INVALID_TOKEN",
            Self::TokenExpired { .. } => "TOKEN_EXPIRED",
            Self::MissingHeader { .. } => "MISSING_AUTH_HEADER",
            Self::InvalidScheme { .. } => "INVALID_AUTH_FORMAT",
            Self::MissingToken { .. } => "MISSING_TOKEN",
            Self::JwtDecode { .. } => "INVALID_TOKEN",
            Self::InvalidClaim { .. } => "INVALID_CLAIM",
        }
    }

    /// Message safe to show to clients (no locations, no key material)
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::MissingHeader { .. } => "authorization header required",
            Self::InvalidScheme { .. } => "invalid authorization header format",
            Self::MissingToken { .. } => "token required",
            Self::TokenExpired { .. } | Self::InvalidToken { .. } | Self::JwtDecode { .. } => {
                "invalid or expired token"
            }
            Self::InvalidClaim { .. } => "invalid token claims",
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;

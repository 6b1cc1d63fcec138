use crate::{AuthError, Result as AuthErrorResult};

use inv_core::Role;

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// JWT claims issued at login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: numeric user id as a string
    pub sub: String,
    /// Company the user belongs to (resolved from the user's branch at login)
    pub company_id: i64,
    pub role: Role,
    #[serde(default)]
    pub username: String,
    /// Expiration timestamp (Unix)
    pub exp: i64,
    /// Issued at timestamp (Unix)
    pub iat: i64,
}

impl Claims {
    /// Validate claims after JWT signature verification
    #[track_caller]
    pub fn validate(&self) -> AuthErrorResult<()> {
        if self.sub.is_empty() {
            return Err(AuthError::InvalidClaim {
                claim: "sub".to_string(),
                message: "sub (user_id) cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        match self.sub.parse::<i64>() {
            Ok(id) if id > 0 => {}
            _ => {
                return Err(AuthError::InvalidClaim {
                    claim: "sub".to_string(),
                    message: format!("sub must be a positive integer, got '{}'", self.sub),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        }

        if self.company_id <= 0 {
            return Err(AuthError::InvalidClaim {
                claim: "company_id".to_string(),
                message: "company_id must be a positive integer".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }
}

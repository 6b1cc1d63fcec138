use crate::{AuthError, Claims, Result as AuthErrorResult};

use inv_core::{Role, TenantId, UserId};

use std::panic::Location;

use error_location::ErrorLocation;

/// Identity, tenant and role of the caller.
/// This is the validated, trusted context after JWT verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityContext {
    pub user_id: UserId,
    pub tenant_id: TenantId,
    pub role: Role,
    pub username: String,
}

impl IdentityContext {
    pub fn new(user_id: UserId, tenant_id: TenantId, role: Role) -> Self {
        Self {
            user_id,
            tenant_id,
            role,
            username: String::new(),
        }
    }

    #[track_caller]
    pub fn from_claims(claims: Claims) -> AuthErrorResult<Self> {
        let user_id = claims.sub.parse::<i64>().map_err(|_| AuthError::InvalidClaim {
            claim: "sub".to_string(),
            message: format!("sub is not a user id: '{}'", claims.sub),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(Self {
            user_id: UserId(user_id),
            tenant_id: TenantId(claims.company_id),
            role: claims.role,
            username: claims.username,
        })
    }

    pub fn is_privileged(&self) -> bool {
        self.role.is_privileged()
    }
}

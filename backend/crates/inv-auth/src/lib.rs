pub mod bearer;
pub mod claims;
pub mod error;
pub mod identity_context;
pub mod jwt_validator;

pub use bearer::bearer_token;
pub use claims::Claims;
pub use error::{AuthError, Result};
pub use identity_context::IdentityContext;
pub use jwt_validator::JwtValidator;

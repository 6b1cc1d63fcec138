pub mod error;
pub mod models;

pub use error::{CoreError, Result};
pub use error_location::ErrorLocation;
pub use models::new_sale::NewSale;
pub use models::payment_status::PaymentStatus;
pub use models::role::Role;
pub use models::sale::Sale;
pub use models::tenant_id::TenantId;
pub use models::user_id::UserId;

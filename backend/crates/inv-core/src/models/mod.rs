pub mod new_sale;
pub mod payment_status;
pub mod role;
pub mod sale;
pub mod tenant_id;
pub mod user_id;

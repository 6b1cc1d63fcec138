pub mod api;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;
pub mod state;

#[cfg(test)]
mod tests;

pub use api::{
    error::{ApiError, Result as ApiResult},
    extractors::identity::Identity,
    sales::sales::{create_sale, get_sale, sale_events},
};
pub use error::{Result as ServerResult, ServerError};
pub use routes::build_router;
pub use state::AppState;

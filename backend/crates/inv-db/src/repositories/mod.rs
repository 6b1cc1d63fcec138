pub mod sale_repository;
pub mod seller_repository;

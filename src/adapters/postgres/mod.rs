//! PostgreSQL adapters - sqlx implementations of the repository ports.

mod account_repository;
mod product_repository;
mod product_request_repository;
mod stock_request_repository;

pub use account_repository::{PostgresAdminRepository, PostgresVendorRepository};
pub use product_repository::PostgresProductRepository;
pub use product_request_repository::PostgresProductRequestRepository;
pub use stock_request_repository::PostgresStockRequestRepository;

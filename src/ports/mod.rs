//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Repository Ports
//!
//! - `VendorRepository` / `AdminRepository` - account persistence
//! - `ProductRepository` - vendor-scoped listing persistence
//! - `ProductRequestRepository` - proposal queue persistence
//! - `StockRequestRepository` - stock request persistence with
//!   optimistic-concurrency updates
//!
//! ## Service Ports
//!
//! - `CredentialCipher` - authenticated encryption of stored credentials
//! - `PasswordHasher` - password hashing and verification
//! - `TokenIssuer` / `TokenValidator` - session token lifecycle

mod account_repository;
mod credential_cipher;
mod password_hasher;
mod product_repository;
mod product_request_repository;
mod stock_request_repository;
mod token_service;

pub use account_repository::{AdminRepository, VendorRepository};
pub use credential_cipher::CredentialCipher;
pub use password_hasher::PasswordHasher;
pub use product_repository::ProductRepository;
pub use product_request_repository::{ProductRequestFilter, ProductRequestRepository};
pub use stock_request_repository::{StockRequestFilter, StockRequestRepository};
pub use token_service::{AuthenticatedActor, Role, TokenIssuer, TokenValidator};

//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - JWT session tokens and Argon2 password hashing
//! - `crypto` - AES-256-GCM credential encryption
//! - `http` - axum routes, handlers, DTOs, and middleware
//! - `postgres` - sqlx repository implementations

pub mod auth;
pub mod crypto;
pub mod http;
pub mod postgres;

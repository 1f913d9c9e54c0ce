//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `vendor` - Vendor tenant accounts and lifecycle
//! - `product` - Product listings with plans, profiles, and credentials
//! - `review` - Vendor product proposals and the admin review state machine
//! - `fulfillment` - Admin stock requests and vendor fulfillment accounting

pub mod foundation;
pub mod fulfillment;
pub mod product;
pub mod review;
pub mod vendor;

//! Command and query handlers, grouped by workflow.

pub mod auth;
pub mod fulfillment;
pub mod product;
pub mod review;

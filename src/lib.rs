//! Next Subscription - Multi-tenant subscription marketplace backend.
//!
//! Vendors list shared subscription products, admins review vendor
//! proposals and request additional stock, and vendors fulfill those
//! requests by supplying account credentials.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between
//! ports. Command handlers mutate aggregates; query handlers read them.

pub mod handlers;

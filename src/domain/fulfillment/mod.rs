//! Fulfillment domain - admin stock requests and the quantity
//! accounting around vendor fulfillment.

mod aggregate;
mod status;

pub use aggregate::{FulfillmentEntry, StockRequest};
pub use status::StockRequestStatus;

//! StockRequestStatus enum for the stock request lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of an admin stock request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StockRequestStatus {
    #[default]
    Requested,
    PartiallyFulfilled,
    Fulfilled,
    Rejected,
    Cancelled,
}

impl StockRequestStatus {
    /// Returns true if no further transitions are allowed.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            StockRequestStatus::Fulfilled
                | StockRequestStatus::Rejected
                | StockRequestStatus::Cancelled
        )
    }

    /// Returns true if the vendor may still supply stock against it.
    pub fn accepts_fulfillment(&self) -> bool {
        matches!(
            self,
            StockRequestStatus::Requested | StockRequestStatus::PartiallyFulfilled
        )
    }
}

impl fmt::Display for StockRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StockRequestStatus::Requested => "requested",
            StockRequestStatus::PartiallyFulfilled => "partially_fulfilled",
            StockRequestStatus::Fulfilled => "fulfilled",
            StockRequestStatus::Rejected => "rejected",
            StockRequestStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", s)
    }
}

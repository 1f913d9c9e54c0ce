//! Stock request repository port.
//!
//! Updates are version-guarded: `update_versioned` only applies when the
//! stored row still carries `expected_version`, so two concurrent
//! fulfillments cannot both win and silently clobber the quantity
//! counters.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, StockRequestId, VendorId};
use crate::domain::fulfillment::{StockRequest, StockRequestStatus};

/// Filter for listing stock requests.
#[derive(Debug, Clone, Default)]
pub struct StockRequestFilter {
    /// Only requests in this status.
    pub status: Option<StockRequestStatus>,

    /// Only requests addressed to this vendor.
    pub vendor_id: Option<VendorId>,
}

/// Repository port for StockRequest aggregate persistence.
#[async_trait]
pub trait StockRequestRepository: Send + Sync {
    /// Save a new stock request.
    async fn create(&self, request: &StockRequest) -> Result<(), DomainError>;

    /// Persist changes only if the stored version equals `expected_version`.
    ///
    /// # Errors
    ///
    /// - `Conflict` if the row changed since it was read (stale version)
    /// - `StockRequestNotFound` if the request does not exist
    async fn update_versioned(
        &self,
        request: &StockRequest,
        expected_version: i32,
    ) -> Result<(), DomainError>;

    /// Find a stock request by id. Returns `None` if not found.
    async fn find_by_id(&self, id: &StockRequestId)
        -> Result<Option<StockRequest>, DomainError>;

    /// List stock requests matching the filter, newest first.
    async fn list(&self, filter: &StockRequestFilter) -> Result<Vec<StockRequest>, DomainError>;
}

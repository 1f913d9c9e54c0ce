//! Product request repository port (admin review queue).

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ProductRequestId, VendorId};
use crate::domain::review::{ProductRequest, ReviewStatus};

/// Filter for listing the review queue.
#[derive(Debug, Clone, Default)]
pub struct ProductRequestFilter {
    /// Only proposals in this status.
    pub status: Option<ReviewStatus>,

    /// Only proposals from this vendor.
    pub vendor_id: Option<VendorId>,
}

/// Repository port for ProductRequest aggregate persistence.
#[async_trait]
pub trait ProductRequestRepository: Send + Sync {
    /// Save a new proposal.
    async fn create(&self, request: &ProductRequest) -> Result<(), DomainError>;

    /// Persist changes to an existing proposal.
    ///
    /// # Errors
    ///
    /// - `ProductRequestNotFound` if the proposal does not exist
    async fn update(&self, request: &ProductRequest) -> Result<(), DomainError>;

    /// Find a proposal by id. Returns `None` if not found.
    async fn find_by_id(
        &self,
        id: &ProductRequestId,
    ) -> Result<Option<ProductRequest>, DomainError>;

    /// List proposals matching the filter, newest first.
    async fn list(&self, filter: &ProductRequestFilter)
        -> Result<Vec<ProductRequest>, DomainError>;
}

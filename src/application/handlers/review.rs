//! Review handlers: proposal submission, the admin queue, and decisions.

use std::sync::Arc;

use crate::domain::foundation::{
    AdminId, DomainError, ErrorCode, ProductId, ProductRequestId, VendorId,
};
use crate::domain::product::Product;
use crate::domain::review::{ProductRequest, ProductRequestDraft, ReviewAction, ReviewStatus};
use crate::ports::{ProductRepository, ProductRequestFilter, ProductRequestRepository};

fn request_not_found() -> DomainError {
    DomainError::new(ErrorCode::ProductRequestNotFound, "Product request not found")
}

/// Command for a vendor to submit a product proposal.
#[derive(Debug, Clone)]
pub struct SubmitProductRequestCommand {
    pub vendor_id: VendorId,
    pub draft: ProductRequestDraft,
}

/// Handles proposal submission.
pub struct SubmitProductRequestHandler {
    requests: Arc<dyn ProductRequestRepository>,
}

impl SubmitProductRequestHandler {
    pub fn new(requests: Arc<dyn ProductRequestRepository>) -> Self {
        Self { requests }
    }

    pub async fn handle(
        &self,
        cmd: SubmitProductRequestCommand,
    ) -> Result<ProductRequest, DomainError> {
        let request = ProductRequest::submit(ProductRequestId::new(), cmd.vendor_id, cmd.draft)?;
        self.requests.create(&request).await?;
        tracing::info!(request_id = %request.id, vendor_id = %request.vendor_id, "product request submitted");
        Ok(request)
    }
}

/// Query over the review queue.
pub struct ListProductRequestsHandler {
    requests: Arc<dyn ProductRequestRepository>,
}

impl ListProductRequestsHandler {
    pub fn new(requests: Arc<dyn ProductRequestRepository>) -> Self {
        Self { requests }
    }

    pub async fn handle(
        &self,
        filter: ProductRequestFilter,
    ) -> Result<Vec<ProductRequest>, DomainError> {
        self.requests.list(&filter).await
    }
}

/// Query for one proposal by id.
pub struct GetProductRequestHandler {
    requests: Arc<dyn ProductRequestRepository>,
}

impl GetProductRequestHandler {
    pub fn new(requests: Arc<dyn ProductRequestRepository>) -> Self {
        Self { requests }
    }

    pub async fn handle(&self, id: &ProductRequestId) -> Result<ProductRequest, DomainError> {
        self.requests.find_by_id(id).await?.ok_or_else(request_not_found)
    }
}

/// Command for an admin decision on a pending proposal.
#[derive(Debug, Clone)]
pub struct ReviewProductRequestCommand {
    pub request_id: ProductRequestId,
    pub action: ReviewAction,
    pub comment: Option<String>,
    pub admin_id: AdminId,
}

/// Outcome of an admin decision.
#[derive(Debug)]
pub struct ReviewProductRequestResult {
    pub request: ProductRequest,
    /// The listing materialized by an approval, if any.
    pub created_product: Option<Product>,
}

/// Handles admin decisions. Approval materializes an active Product
/// from the proposal's first pricing plan.
pub struct ReviewProductRequestHandler {
    requests: Arc<dyn ProductRequestRepository>,
    products: Arc<dyn ProductRepository>,
}

impl ReviewProductRequestHandler {
    pub fn new(
        requests: Arc<dyn ProductRequestRepository>,
        products: Arc<dyn ProductRepository>,
    ) -> Self {
        Self { requests, products }
    }

    pub async fn handle(
        &self,
        cmd: ReviewProductRequestCommand,
    ) -> Result<ReviewProductRequestResult, DomainError> {
        let mut request = self
            .requests
            .find_by_id(&cmd.request_id)
            .await?
            .ok_or_else(request_not_found)?;

        request.decide(cmd.action, cmd.comment, cmd.admin_id)?;

        let approved_plan = if request.status == ReviewStatus::Approved {
            Some(
                request
                    .draft
                    .plans
                    .first()
                    .cloned()
                    .ok_or_else(|| DomainError::validation("plans", "Proposal has no pricing plan"))?,
            )
        } else {
            None
        };

        // The decision must be durable before the listing exists; if this
        // write fails, no product is minted and the approval can be retried.
        self.requests.update(&request).await?;

        let created_product = if let Some(plan) = approved_plan {
            let mut product = Product::new(
                ProductId::new(),
                request.vendor_id,
                request.draft.provider.clone(),
                request.draft.service_type,
                plan,
                request.draft.initial_stock,
            )?;
            product.status = crate::domain::product::ProductStatus::Active;
            self.products.create(&product).await?;
            tracing::info!(
                request_id = %request.id,
                product_id = %product.id,
                "product request approved, listing created"
            );
            Some(product)
        } else {
            None
        };

        Ok(ReviewProductRequestResult {
            request,
            created_product,
        })
    }
}

/// Command for a vendor to resubmit after changes were requested.
#[derive(Debug, Clone)]
pub struct ResubmitProductRequestCommand {
    pub request_id: ProductRequestId,
    pub vendor_id: VendorId,
    pub draft: ProductRequestDraft,
}

/// Handles vendor resubmission.
pub struct ResubmitProductRequestHandler {
    requests: Arc<dyn ProductRequestRepository>,
}

impl ResubmitProductRequestHandler {
    pub fn new(requests: Arc<dyn ProductRequestRepository>) -> Self {
        Self { requests }
    }

    pub async fn handle(
        &self,
        cmd: ResubmitProductRequestCommand,
    ) -> Result<ProductRequest, DomainError> {
        let mut request = self
            .requests
            .find_by_id(&cmd.request_id)
            .await?
            .ok_or_else(request_not_found)?;

        // Foreign proposals behave as missing.
        if request.vendor_id != cmd.vendor_id {
            return Err(request_not_found());
        }

        request.resubmit(cmd.draft)?;
        self.requests.update(&request).await?;
        Ok(request)
    }
}

//! Integration tests for the proposal review workflow, wiring the
//! application handlers against in-memory repositories.

mod common;

use std::sync::Arc;

use next_subscription::application::handlers::review::{
    ResubmitProductRequestCommand, ResubmitProductRequestHandler, ReviewProductRequestCommand,
    ReviewProductRequestHandler, SubmitProductRequestCommand, SubmitProductRequestHandler,
};
use next_subscription::domain::foundation::{AdminId, ErrorCode, VendorId};
use next_subscription::domain::product::{PricingPlan, ProductStatus, ServiceType};
use next_subscription::domain::review::{ProductRequestDraft, ReviewAction, ReviewStatus};

use common::{MockProductRepository, MockProductRequestRepository};

fn draft() -> ProductRequestDraft {
    ProductRequestDraft {
        provider: "Netflix".into(),
        service_type: ServiceType::AccountShare,
        plans: vec![
            PricingPlan::new(1, 4_99, "USD").unwrap(),
            PricingPlan::new(12, 49_99, "USD").unwrap(),
        ],
        initial_stock: 5,
        attachments: vec!["https://files.example/proof.png".into()],
    }
}

struct Fixture {
    requests: Arc<MockProductRequestRepository>,
    products: Arc<MockProductRepository>,
}

impl Fixture {
    fn new() -> Self {
        Self {
            requests: Arc::new(MockProductRequestRepository::new()),
            products: Arc::new(MockProductRepository::new()),
        }
    }

    fn submit_handler(&self) -> SubmitProductRequestHandler {
        SubmitProductRequestHandler::new(self.requests.clone())
    }

    fn review_handler(&self) -> ReviewProductRequestHandler {
        ReviewProductRequestHandler::new(self.requests.clone(), self.products.clone())
    }

    fn resubmit_handler(&self) -> ResubmitProductRequestHandler {
        ResubmitProductRequestHandler::new(self.requests.clone())
    }
}

#[tokio::test]
async fn submitted_proposal_is_pending_review() {
    let fx = Fixture::new();
    let request = fx
        .submit_handler()
        .handle(SubmitProductRequestCommand {
            vendor_id: VendorId::new(),
            draft: draft(),
        })
        .await
        .unwrap();

    assert_eq!(request.status, ReviewStatus::PendingReview);
    assert_eq!(fx.requests.requests.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn reject_without_comment_fails_and_leaves_proposal_untouched() {
    let fx = Fixture::new();
    let request = fx
        .submit_handler()
        .handle(SubmitProductRequestCommand {
            vendor_id: VendorId::new(),
            draft: draft(),
        })
        .await
        .unwrap();

    let err = fx
        .review_handler()
        .handle(ReviewProductRequestCommand {
            request_id: request.id,
            action: ReviewAction::Reject,
            comment: Some("   ".into()),
            admin_id: AdminId::new(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::CommentRequired);
    let stored = fx.requests.requests.lock().unwrap()[0].clone();
    assert_eq!(stored.status, ReviewStatus::PendingReview);
    assert!(stored.review_history.is_empty());
    assert!(fx.products.products.lock().unwrap().is_empty());
}

#[tokio::test]
async fn approval_materializes_an_active_product_for_the_vendor() {
    let fx = Fixture::new();
    let vendor_id = VendorId::new();
    let request = fx
        .submit_handler()
        .handle(SubmitProductRequestCommand {
            vendor_id,
            draft: draft(),
        })
        .await
        .unwrap();

    let result = fx
        .review_handler()
        .handle(ReviewProductRequestCommand {
            request_id: request.id,
            action: ReviewAction::Approve,
            comment: None,
            admin_id: AdminId::new(),
        })
        .await
        .unwrap();

    assert_eq!(result.request.status, ReviewStatus::Approved);
    let product = result.created_product.expect("approval creates a product");
    assert_eq!(product.vendor_id, vendor_id);
    assert_eq!(product.status, ProductStatus::Active);
    assert_eq!(product.provider, "Netflix");
    assert_eq!(product.plan.duration_months, 1);
    assert_eq!(product.stock_count, 5);
    assert_eq!(fx.products.products.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn approval_that_fails_to_persist_mints_no_product() {
    let fx = Fixture::new();
    let request = fx
        .submit_handler()
        .handle(SubmitProductRequestCommand {
            vendor_id: VendorId::new(),
            draft: draft(),
        })
        .await
        .unwrap();

    fx.requests.set_fail_updates(true);
    let err = fx
        .review_handler()
        .handle(ReviewProductRequestCommand {
            request_id: request.id,
            action: ReviewAction::Approve,
            comment: None,
            admin_id: AdminId::new(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::DatabaseError);

    // No listing exists and the proposal is still pending, so the same
    // approval can simply be retried.
    assert!(fx.products.products.lock().unwrap().is_empty());
    let stored = fx.requests.requests.lock().unwrap()[0].clone();
    assert_eq!(stored.status, ReviewStatus::PendingReview);

    fx.requests.set_fail_updates(false);
    let result = fx
        .review_handler()
        .handle(ReviewProductRequestCommand {
            request_id: request.id,
            action: ReviewAction::Approve,
            comment: None,
            admin_id: AdminId::new(),
        })
        .await
        .unwrap();
    assert!(result.created_product.is_some());
    assert_eq!(fx.products.products.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn terminal_proposal_refuses_further_decisions() {
    let fx = Fixture::new();
    let request = fx
        .submit_handler()
        .handle(SubmitProductRequestCommand {
            vendor_id: VendorId::new(),
            draft: draft(),
        })
        .await
        .unwrap();

    fx.review_handler()
        .handle(ReviewProductRequestCommand {
            request_id: request.id,
            action: ReviewAction::Reject,
            comment: Some("Duplicate listing".into()),
            admin_id: AdminId::new(),
        })
        .await
        .unwrap();

    let err = fx
        .review_handler()
        .handle(ReviewProductRequestCommand {
            request_id: request.id,
            action: ReviewAction::Approve,
            comment: None,
            admin_id: AdminId::new(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidStateTransition);
}

#[tokio::test]
async fn changes_requested_proposal_can_be_resubmitted_by_its_vendor() {
    let fx = Fixture::new();
    let vendor_id = VendorId::new();
    let request = fx
        .submit_handler()
        .handle(SubmitProductRequestCommand {
            vendor_id,
            draft: draft(),
        })
        .await
        .unwrap();

    fx.review_handler()
        .handle(ReviewProductRequestCommand {
            request_id: request.id,
            action: ReviewAction::RequestChanges,
            comment: Some("Attach proof of ownership".into()),
            admin_id: AdminId::new(),
        })
        .await
        .unwrap();

    let mut updated = draft();
    updated.provider = "Netflix Premium".into();
    let resubmitted = fx
        .resubmit_handler()
        .handle(ResubmitProductRequestCommand {
            request_id: request.id,
            vendor_id,
            draft: updated,
        })
        .await
        .unwrap();

    assert_eq!(resubmitted.status, ReviewStatus::PendingReview);
    assert_eq!(resubmitted.draft.provider, "Netflix Premium");
    assert_eq!(
        resubmitted.latest_comment(),
        Some("Attach proof of ownership")
    );
}

#[tokio::test]
async fn foreign_vendor_cannot_resubmit_someone_elses_proposal() {
    let fx = Fixture::new();
    let request = fx
        .submit_handler()
        .handle(SubmitProductRequestCommand {
            vendor_id: VendorId::new(),
            draft: draft(),
        })
        .await
        .unwrap();

    fx.review_handler()
        .handle(ReviewProductRequestCommand {
            request_id: request.id,
            action: ReviewAction::RequestChanges,
            comment: Some("Fix the price".into()),
            admin_id: AdminId::new(),
        })
        .await
        .unwrap();

    let err = fx
        .resubmit_handler()
        .handle(ResubmitProductRequestCommand {
            request_id: request.id,
            vendor_id: VendorId::new(),
            draft: draft(),
        })
        .await
        .unwrap_err();

    // Foreign proposals are indistinguishable from missing ones.
    assert_eq!(err.code(), ErrorCode::ProductRequestNotFound);
}

//! ProductRequest aggregate - a vendor proposal awaiting admin review.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    AdminId, DomainError, ErrorCode, ProductRequestId, Timestamp, ValidationError, VendorId,
};
use crate::domain::product::{PricingPlan, ServiceType};

use super::{ReviewAction, ReviewDecision, ReviewStatus};

/// Editable content of a proposal, shared between initial submission
/// and resubmission after changes were requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRequestDraft {
    /// Upstream provider name, e.g. "Spotify".
    pub provider: String,

    /// How access would be delivered to buyers.
    pub service_type: ServiceType,

    /// Proposed pricing options; at least one.
    pub plans: Vec<PricingPlan>,

    /// Initial stock the vendor offers.
    pub initial_stock: i32,

    /// Supporting attachment URLs (screenshots, proof of ownership).
    pub attachments: Vec<String>,
}

impl ProductRequestDraft {
    /// Validates draft content.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank provider, empty plan list,
    /// or negative initial stock.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.provider.trim().is_empty() {
            return Err(ValidationError::empty_field("provider").into());
        }
        if self.plans.is_empty() {
            return Err(ValidationError::empty_field("plans").into());
        }
        if self.initial_stock < 0 {
            return Err(ValidationError::out_of_range(
                "initial_stock",
                0,
                i32::MAX as i64,
                self.initial_stock as i64,
            )
            .into());
        }
        Ok(())
    }
}

/// ProductRequest aggregate - a proposal moving through admin review.
///
/// # Invariants
///
/// - Status transitions follow [`ReviewStatus::can_transition_to`]
/// - Reject and request-changes always carry a non-empty comment
/// - Every decision is appended to `review_history`, never overwritten
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRequest {
    /// Unique identifier for this proposal.
    pub id: ProductRequestId,

    /// Proposing vendor.
    pub vendor_id: VendorId,

    /// Proposal content.
    pub draft: ProductRequestDraft,

    /// Current status in the review lifecycle.
    pub status: ReviewStatus,

    /// Append-only audit trail of admin decisions.
    pub review_history: Vec<ReviewDecision>,

    /// When the proposal was submitted.
    pub created_at: Timestamp,

    /// When the proposal was last updated.
    pub updated_at: Timestamp,
}

impl ProductRequest {
    /// Submits a new proposal in PendingReview status.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the draft content is invalid.
    pub fn submit(
        id: ProductRequestId,
        vendor_id: VendorId,
        draft: ProductRequestDraft,
    ) -> Result<Self, DomainError> {
        draft.validate()?;
        let now = Timestamp::now();
        Ok(Self {
            id,
            vendor_id,
            draft,
            status: ReviewStatus::PendingReview,
            review_history: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies an admin decision, recording it in the audit trail.
    ///
    /// # Errors
    ///
    /// - `CommentRequired` if the action demands a comment and none (or a
    ///   blank one) was given
    /// - `InvalidStateTransition` if the proposal is not pending review
    pub fn decide(
        &mut self,
        action: ReviewAction,
        comment: Option<String>,
        admin_id: AdminId,
    ) -> Result<(), DomainError> {
        let comment = comment.filter(|c| !c.trim().is_empty());
        if action.requires_comment() && comment.is_none() {
            return Err(DomainError::new(
                ErrorCode::CommentRequired,
                format!("A comment is required to {}", action),
            ));
        }

        let target = action.target_status();
        if !self.status.can_transition_to(&target) {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot {} a proposal in status {}", action, self.status),
            ));
        }

        self.status = target;
        self.review_history.push(ReviewDecision {
            action,
            comment,
            admin_id,
            decided_at: Timestamp::now(),
        });
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Resubmits the proposal with updated content after changes were
    /// requested.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` unless the proposal is in ChangesRequested
    /// - A validation error if the new draft content is invalid
    pub fn resubmit(&mut self, draft: ProductRequestDraft) -> Result<(), DomainError> {
        if !self.status.can_transition_to(&ReviewStatus::PendingReview) {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot resubmit a proposal in status {}", self.status),
            ));
        }
        draft.validate()?;
        self.draft = draft;
        self.status = ReviewStatus::PendingReview;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Returns the most recent reviewer comment, if any.
    pub fn latest_comment(&self) -> Option<&str> {
        self.review_history
            .iter()
            .rev()
            .find_map(|d| d.comment.as_deref())
    }
}

//! ReviewStatus enum for the product proposal lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a vendor product proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    #[default]
    PendingReview,
    Approved,
    Rejected,
    ChangesRequested,
}

impl ReviewStatus {
    /// Returns true if no further transitions are allowed.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReviewStatus::Approved | ReviewStatus::Rejected)
    }

    /// Returns true if an admin may act on the proposal.
    pub fn is_reviewable(&self) -> bool {
        matches!(self, ReviewStatus::PendingReview)
    }

    /// Validates a transition from this status to another.
    ///
    /// Valid transitions:
    /// - PendingReview -> Approved | Rejected | ChangesRequested
    /// - ChangesRequested -> PendingReview (vendor resubmission)
    pub fn can_transition_to(&self, target: &ReviewStatus) -> bool {
        use ReviewStatus::*;
        matches!(
            (self, target),
            (PendingReview, Approved)
                | (PendingReview, Rejected)
                | (PendingReview, ChangesRequested)
                | (ChangesRequested, PendingReview)
        )
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReviewStatus::PendingReview => "pending_review",
            ReviewStatus::Approved => "approved",
            ReviewStatus::Rejected => "rejected",
            ReviewStatus::ChangesRequested => "changes_requested",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_pending_review() {
        assert_eq!(ReviewStatus::default(), ReviewStatus::PendingReview);
    }

    #[test]
    fn approved_and_rejected_are_terminal() {
        assert!(ReviewStatus::Approved.is_terminal());
        assert!(ReviewStatus::Rejected.is_terminal());
        assert!(!ReviewStatus::ChangesRequested.is_terminal());
        assert!(!ReviewStatus::PendingReview.is_terminal());
    }

    #[test]
    fn pending_review_reaches_all_decisions() {
        assert!(ReviewStatus::PendingReview.can_transition_to(&ReviewStatus::Approved));
        assert!(ReviewStatus::PendingReview.can_transition_to(&ReviewStatus::Rejected));
        assert!(ReviewStatus::PendingReview.can_transition_to(&ReviewStatus::ChangesRequested));
    }

    #[test]
    fn changes_requested_is_re_enterable() {
        assert!(ReviewStatus::ChangesRequested.can_transition_to(&ReviewStatus::PendingReview));
        assert!(!ReviewStatus::ChangesRequested.can_transition_to(&ReviewStatus::Approved));
    }

    #[test]
    fn terminal_states_refuse_everything() {
        for target in [
            ReviewStatus::PendingReview,
            ReviewStatus::Approved,
            ReviewStatus::Rejected,
            ReviewStatus::ChangesRequested,
        ] {
            assert!(!ReviewStatus::Approved.can_transition_to(&target));
            assert!(!ReviewStatus::Rejected.can_transition_to(&target));
        }
    }

    #[test]
    fn serializes_to_snake_case_json() {
        assert_eq!(
            serde_json::to_string(&ReviewStatus::ChangesRequested).unwrap(),
            "\"changes_requested\""
        );
    }
}

//! Review decisions and the audit trail they leave behind.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{AdminId, Timestamp};

use super::ReviewStatus;

/// Action an admin can take on a pending proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAction {
    Approve,
    Reject,
    RequestChanges,
}

impl ReviewAction {
    /// Returns the status the proposal moves to under this action.
    pub fn target_status(&self) -> ReviewStatus {
        match self {
            ReviewAction::Approve => ReviewStatus::Approved,
            ReviewAction::Reject => ReviewStatus::Rejected,
            ReviewAction::RequestChanges => ReviewStatus::ChangesRequested,
        }
    }

    /// Returns true if this action requires a non-empty comment.
    pub fn requires_comment(&self) -> bool {
        matches!(self, ReviewAction::Reject | ReviewAction::RequestChanges)
    }
}

impl fmt::Display for ReviewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReviewAction::Approve => "approve",
            ReviewAction::Reject => "reject",
            ReviewAction::RequestChanges => "request_changes",
        };
        write!(f, "{}", s)
    }
}

/// One entry in a proposal's audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewDecision {
    /// Action taken.
    pub action: ReviewAction,

    /// Reviewer comment; always present for reject/request-changes.
    pub comment: Option<String>,

    /// Admin who decided.
    pub admin_id: AdminId,

    /// When the decision was made.
    pub decided_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_map_to_expected_statuses() {
        assert_eq!(ReviewAction::Approve.target_status(), ReviewStatus::Approved);
        assert_eq!(ReviewAction::Reject.target_status(), ReviewStatus::Rejected);
        assert_eq!(
            ReviewAction::RequestChanges.target_status(),
            ReviewStatus::ChangesRequested
        );
    }

    #[test]
    fn comment_is_required_for_negative_actions_only() {
        assert!(!ReviewAction::Approve.requires_comment());
        assert!(ReviewAction::Reject.requires_comment());
        assert!(ReviewAction::RequestChanges.requires_comment());
    }
}

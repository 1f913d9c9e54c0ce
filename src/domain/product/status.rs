//! ProductStatus enum for the listing lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    #[default]
    Draft,
    Pending,
    Active,
    Inactive,
}

impl ProductStatus {
    /// Returns true if the listing is visible to buyers.
    pub fn is_listed(&self) -> bool {
        matches!(self, ProductStatus::Active)
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProductStatus::Draft => "draft",
            ProductStatus::Pending => "pending",
            ProductStatus::Active => "active",
            ProductStatus::Inactive => "inactive",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_draft() {
        assert_eq!(ProductStatus::default(), ProductStatus::Draft);
    }

    #[test]
    fn only_active_is_listed() {
        assert!(ProductStatus::Active.is_listed());
        assert!(!ProductStatus::Draft.is_listed());
        assert!(!ProductStatus::Inactive.is_listed());
    }
}

//! ServiceType enum describing how access to a product is delivered.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Delivery mechanism for a subscription product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    /// Buyer receives a profile slot on a shared account.
    AccountShare,
    /// Buyer is invited onto a family/team plan by email.
    EmailInvite,
    /// Buyer receives a standalone license key.
    LicenseKey,
    /// Anything else; described in the listing.
    Other,
}

impl ServiceType {
    /// Returns true if fulfillment supplies shared-account profiles.
    pub fn uses_profiles(&self) -> bool {
        matches!(self, ServiceType::AccountShare)
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ServiceType::AccountShare => "account_share",
            ServiceType::EmailInvite => "email_invite",
            ServiceType::LicenseKey => "license_key",
            ServiceType::Other => "other",
        };
        write!(f, "{}", s)
    }
}

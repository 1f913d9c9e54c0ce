//! Session token ports.
//!
//! The HTTP middleware depends only on [`TokenValidator`], keeping it
//! agnostic of how tokens are minted. [`TokenIssuer`] is used by the login
//! handlers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::DomainError;

/// Role carried in a session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Vendor,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Vendor => write!(f, "vendor"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// Identity extracted from a validated session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// Subject id (vendor or admin uuid, as a string).
    pub id: String,

    /// Role the token was minted for.
    pub role: Role,
}

/// Mints session tokens.
pub trait TokenIssuer: Send + Sync {
    /// Issues a signed token for the given subject and role.
    fn issue(&self, subject: &str, role: Role) -> Result<String, DomainError>;
}

/// Validates session tokens.
pub trait TokenValidator: Send + Sync {
    /// Validates a token, returning the actor it identifies.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` for expired, malformed, or forged tokens
    fn validate(&self, token: &str) -> Result<AuthenticatedActor, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_to_snake_case() {
        assert_eq!(serde_json::to_string(&Role::Vendor).unwrap(), "\"vendor\"");
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    }

    #[test]
    fn role_display_matches_wire_form() {
        assert_eq!(Role::Vendor.to_string(), "vendor");
        assert_eq!(Role::Admin.to_string(), "admin");
    }
}

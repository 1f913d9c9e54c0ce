//! Account profile value object - a sub-slot within a shared account.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ValidationError};

/// One assignable profile slot on a shared subscription account
/// (e.g. a single Netflix profile).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountProfile {
    /// Profile name as shown in the upstream service.
    pub name: String,

    /// Optional numeric PIN protecting the profile.
    pub pin: Option<String>,

    /// Whether this slot has been assigned to a buyer.
    pub assigned: bool,
}

impl AccountProfile {
    /// Creates an unassigned profile slot.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name is blank or the PIN is not
    /// 4-6 digits.
    pub fn new(name: impl Into<String>, pin: Option<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name").into());
        }
        if let Some(ref pin) = pin {
            let digits_only = pin.chars().all(|c| c.is_ascii_digit());
            if !digits_only || pin.len() < 4 || pin.len() > 6 {
                return Err(
                    ValidationError::invalid_format("pin", "expected 4-6 digits").into(),
                );
            }
        }
        Ok(Self {
            name,
            pin,
            assigned: false,
        })
    }
}

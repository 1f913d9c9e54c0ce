//! Pricing plan value object.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ValidationError};

/// A pricing option for a product.
///
/// Monetary values are stored as integer cents, never floats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingPlan {
    /// Subscription duration in months.
    pub duration_months: i32,

    /// Price in minor currency units (cents).
    pub price_cents: i64,

    /// ISO 4217 currency code, e.g. "USD".
    pub currency: String,
}

impl PricingPlan {
    /// Creates a validated pricing plan.
    ///
    /// # Errors
    ///
    /// Returns a validation error for non-positive duration, negative price,
    /// or a currency code that is not three ASCII letters.
    pub fn new(
        duration_months: i32,
        price_cents: i64,
        currency: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let currency = currency.into().to_ascii_uppercase();
        if duration_months <= 0 {
            return Err(ValidationError::out_of_range(
                "duration_months",
                1,
                i32::MAX as i64,
                duration_months as i64,
            )
            .into());
        }
        if price_cents < 0 {
            return Err(
                ValidationError::out_of_range("price_cents", 0, i64::MAX, price_cents).into(),
            );
        }
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::invalid_format(
                "currency",
                "expected three-letter ISO 4217 code",
            )
            .into());
        }
        Ok(Self {
            duration_months,
            price_cents,
            currency,
        })
    }
}

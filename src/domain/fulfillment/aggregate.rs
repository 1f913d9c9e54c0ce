//! StockRequest aggregate - an admin's ask for additional inventory.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    AdminId, DomainError, ErrorCode, ProductId, StockRequestId, Timestamp, ValidationError,
    VendorId,
};
use crate::domain::product::AccountProfile;

use super::StockRequestStatus;

/// One credential the vendor supplies while fulfilling a stock request,
/// either typed into the form or parsed from an uploaded CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillmentEntry {
    /// Profile slot name.
    pub name: String,

    /// Optional profile PIN (4-6 digits).
    pub pin: Option<String>,

    /// Optional plaintext account credential; encrypted before storage.
    pub credential: Option<String>,
}

impl FulfillmentEntry {
    /// Converts this entry into an unassigned profile slot.
    ///
    /// # Errors
    ///
    /// Returns a validation error if name or PIN is malformed.
    pub fn into_profile(self) -> Result<AccountProfile, DomainError> {
        AccountProfile::new(self.name, self.pin)
    }
}

/// StockRequest aggregate - quantity accounting between admin and vendor.
///
/// # Invariants
///
/// - `quantity_requested > 0`
/// - `0 <= quantity_fulfilled <= quantity_requested`
/// - Status is derived from the quantities on every fulfillment
/// - `version` increments on every persisted change; repositories use it
///   for optimistic concurrency so concurrent fulfillments cannot produce
///   lost updates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRequest {
    /// Unique identifier for this request.
    pub id: StockRequestId,

    /// Product the stock is for.
    pub product_id: ProductId,

    /// Vendor expected to fulfill.
    pub vendor_id: VendorId,

    /// Admin who opened the request.
    pub requested_by: AdminId,

    /// Units asked for.
    pub quantity_requested: i32,

    /// Units supplied so far.
    pub quantity_fulfilled: i32,

    /// Current status in the fulfillment lifecycle.
    pub status: StockRequestStatus,

    /// Optional note from the admin, or the vendor's rejection reason.
    pub note: Option<String>,

    /// Optimistic-concurrency version, incremented on every update.
    pub version: i32,

    /// When the request was opened.
    pub created_at: Timestamp,

    /// When the request was last updated.
    pub updated_at: Timestamp,
}

impl StockRequest {
    /// Opens a new stock request.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the quantity is not positive.
    pub fn open(
        id: StockRequestId,
        product_id: ProductId,
        vendor_id: VendorId,
        requested_by: AdminId,
        quantity_requested: i32,
        note: Option<String>,
    ) -> Result<Self, DomainError> {
        if quantity_requested <= 0 {
            return Err(ValidationError::out_of_range(
                "quantity_requested",
                1,
                i32::MAX as i64,
                quantity_requested as i64,
            )
            .into());
        }
        let now = Timestamp::now();
        Ok(Self {
            id,
            product_id,
            vendor_id,
            requested_by,
            quantity_requested,
            quantity_fulfilled: 0,
            status: StockRequestStatus::Requested,
            note,
            version: 1,
            created_at: now,
            updated_at: now,
        })
    }

    /// Units still outstanding.
    pub fn remaining(&self) -> i32 {
        self.quantity_requested - self.quantity_fulfilled
    }

    /// Records `units` of fulfillment, deriving the new status.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the request no longer accepts stock
    /// - `QuantityExceeded` if `units` overshoots the remaining quantity;
    ///   counters are left untouched
    pub fn record_fulfillment(&mut self, units: i32) -> Result<(), DomainError> {
        if !self.status.accepts_fulfillment() {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Stock request in status {} cannot be fulfilled", self.status),
            ));
        }
        if units <= 0 {
            return Err(
                ValidationError::out_of_range("units", 1, i32::MAX as i64, units as i64).into(),
            );
        }
        if units > self.remaining() {
            return Err(DomainError::new(
                ErrorCode::QuantityExceeded,
                format!(
                    "Fulfillment of {} units exceeds the {} remaining",
                    units,
                    self.remaining()
                ),
            ));
        }

        self.quantity_fulfilled += units;
        self.status = if self.remaining() == 0 {
            StockRequestStatus::Fulfilled
        } else {
            StockRequestStatus::PartiallyFulfilled
        };
        self.touch();
        Ok(())
    }

    /// Vendor declines the request.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` if the request is already terminal.
    pub fn reject(&mut self, reason: Option<String>) -> Result<(), DomainError> {
        if self.status.is_terminal() {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Stock request in status {} cannot be rejected", self.status),
            ));
        }
        self.status = StockRequestStatus::Rejected;
        if reason.is_some() {
            self.note = reason;
        }
        self.touch();
        Ok(())
    }

    /// Admin withdraws the request.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` if the request is already terminal.
    pub fn cancel(&mut self) -> Result<(), DomainError> {
        if self.status.is_terminal() {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Stock request in status {} cannot be cancelled", self.status),
            ));
        }
        self.status = StockRequestStatus::Cancelled;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.version += 1;
        self.updated_at = Timestamp::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(quantity: i32) -> StockRequest {
        StockRequest::open(
            StockRequestId::new(),
            ProductId::new(),
            VendorId::new(),
            AdminId::new(),
            quantity,
            None,
        )
        .unwrap()
    }

    #[test]
    fn open_starts_requested_at_version_one() {
        let r = request(5);
        assert_eq!(r.status, StockRequestStatus::Requested);
        assert_eq!(r.version, 1);
        assert_eq!(r.remaining(), 5);
    }

    #[test]
    fn open_rejects_non_positive_quantity() {
        assert!(StockRequest::open(
            StockRequestId::new(),
            ProductId::new(),
            VendorId::new(),
            AdminId::new(),
            0,
            None,
        )
        .is_err());
    }

    #[test]
    fn partial_fulfillment_derives_partially_fulfilled() {
        let mut r = request(5);
        r.record_fulfillment(2).unwrap();
        assert_eq!(r.status, StockRequestStatus::PartiallyFulfilled);
        assert_eq!(r.remaining(), 3);
        assert_eq!(r.version, 2);
    }

    #[test]
    fn exact_completion_derives_fulfilled() {
        let mut r = request(5);
        r.record_fulfillment(2).unwrap();
        r.record_fulfillment(3).unwrap();
        assert_eq!(r.status, StockRequestStatus::Fulfilled);
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn overshoot_fails_and_leaves_counters_untouched() {
        let mut r = request(5);
        r.record_fulfillment(4).unwrap();
        let err = r.record_fulfillment(2).unwrap_err();
        assert_eq!(err.code(), ErrorCode::QuantityExceeded);
        assert_eq!(r.quantity_fulfilled, 4);
        assert_eq!(r.status, StockRequestStatus::PartiallyFulfilled);
    }

    #[test]
    fn fulfilled_request_accepts_no_more_stock() {
        let mut r = request(1);
        r.record_fulfillment(1).unwrap();
        let err = r.record_fulfillment(1).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidStateTransition);
    }

    #[test]
    fn reject_records_reason_and_is_terminal() {
        let mut r = request(3);
        r.reject(Some("Out of accounts".into())).unwrap();
        assert_eq!(r.status, StockRequestStatus::Rejected);
        assert_eq!(r.note.as_deref(), Some("Out of accounts"));
        assert!(r.cancel().is_err());
    }

    #[test]
    fn cancel_only_from_open_states() {
        let mut r = request(3);
        r.record_fulfillment(1).unwrap();
        assert!(r.cancel().is_ok());
        assert_eq!(r.status, StockRequestStatus::Cancelled);

        let mut done = request(1);
        done.record_fulfillment(1).unwrap();
        assert!(done.cancel().is_err());
    }

    #[test]
    fn every_mutation_bumps_version() {
        let mut r = request(4);
        r.record_fulfillment(1).unwrap();
        r.record_fulfillment(1).unwrap();
        r.cancel().unwrap();
        assert_eq!(r.version, 4);
    }
}

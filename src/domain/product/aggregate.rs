//! Product aggregate - a vendor-owned subscription listing.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, ErrorCode, ProductId, Timestamp, ValidationError, VendorId,
};

use super::{AccountProfile, PricingPlan, ProductStatus, ServiceType};

/// Product aggregate - one listing owned by exactly one vendor.
///
/// # Invariants
///
/// - All access is scoped by `vendor_id`; repositories never return another
///   vendor's product to a caller
/// - `stock_count >= 0`
/// - `encrypted_credential` holds ciphertext only; plaintext credentials
///   never reach persistence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier for this product.
    pub id: ProductId,

    /// Owning vendor.
    pub vendor_id: VendorId,

    /// Upstream provider name, e.g. "Netflix".
    pub provider: String,

    /// How access is delivered to buyers.
    pub service_type: ServiceType,

    /// The listing's pricing plan.
    pub plan: PricingPlan,

    /// Units currently available for sale.
    pub stock_count: i32,

    /// Current status in the listing lifecycle.
    pub status: ProductStatus,

    /// AES-256-GCM ciphertext of the shared account credential,
    /// formatted `nonceHex:cipherHex`. `None` when no credential stored.
    pub encrypted_credential: Option<String>,

    /// Assignable sub-slots on the shared account.
    pub profiles: Vec<AccountProfile>,

    /// When the listing was created.
    pub created_at: Timestamp,

    /// When the listing was last updated.
    pub updated_at: Timestamp,
}

impl Product {
    /// Creates a new draft listing.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the provider is blank or stock is
    /// negative.
    pub fn new(
        id: ProductId,
        vendor_id: VendorId,
        provider: impl Into<String>,
        service_type: ServiceType,
        plan: PricingPlan,
        stock_count: i32,
    ) -> Result<Self, DomainError> {
        let provider = provider.into();
        if provider.trim().is_empty() {
            return Err(ValidationError::empty_field("provider").into());
        }
        if stock_count < 0 {
            return Err(ValidationError::out_of_range(
                "stock_count",
                0,
                i32::MAX as i64,
                stock_count as i64,
            )
            .into());
        }

        let now = Timestamp::now();
        Ok(Self {
            id,
            vendor_id,
            provider,
            service_type,
            plan,
            stock_count,
            status: ProductStatus::Draft,
            encrypted_credential: None,
            profiles: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Returns true if the given vendor owns this product.
    pub fn is_owned_by(&self, vendor_id: &VendorId) -> bool {
        &self.vendor_id == vendor_id
    }

    /// Stores a new encrypted credential, replacing any previous one.
    pub fn set_encrypted_credential(&mut self, ciphertext: Option<String>) {
        self.encrypted_credential = ciphertext;
        self.updated_at = Timestamp::now();
    }

    /// Appends fulfillment output: new profile slots plus matching stock.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `units` is not positive.
    pub fn add_inventory(
        &mut self,
        profiles: Vec<AccountProfile>,
        units: i32,
    ) -> Result<(), DomainError> {
        if units <= 0 {
            return Err(ValidationError::out_of_range(
                "units",
                1,
                i32::MAX as i64,
                units as i64,
            )
            .into());
        }
        self.profiles.extend(profiles);
        self.stock_count += units;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Assigns the first unassigned profile slot, decrementing stock.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` when no unassigned slot remains.
    pub fn assign_next_profile(&mut self) -> Result<&AccountProfile, DomainError> {
        let slot = self
            .profiles
            .iter_mut()
            .find(|p| !p.assigned)
            .ok_or_else(|| DomainError::new(ErrorCode::Conflict, "No unassigned profile left"))?;
        slot.assigned = true;
        if self.stock_count > 0 {
            self.stock_count -= 1;
        }
        self.updated_at = Timestamp::now();
        Ok(&*slot)
    }
}

//! Repository ports for vendor and admin accounts.

use async_trait::async_trait;

use crate::domain::foundation::{AdminId, DomainError, VendorId};
use crate::domain::vendor::{Admin, Vendor};

/// Repository port for Vendor aggregate persistence.
///
/// Implementations must enforce a unique `primary_email` constraint.
#[async_trait]
pub trait VendorRepository: Send + Sync {
    /// Save a new vendor.
    async fn create(&self, vendor: &Vendor) -> Result<(), DomainError>;

    /// Persist changes to an existing vendor.
    ///
    /// # Errors
    ///
    /// - `VendorNotFound` if the vendor does not exist
    async fn update(&self, vendor: &Vendor) -> Result<(), DomainError>;

    /// Find a vendor by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &VendorId) -> Result<Option<Vendor>, DomainError>;

    /// Find a vendor by primary email. Returns `None` if not found.
    ///
    /// This is the login lookup; matching is case-insensitive.
    async fn find_by_email(&self, email: &str) -> Result<Option<Vendor>, DomainError>;
}

/// Repository port for Admin account persistence.
#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Find an admin by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &AdminId) -> Result<Option<Admin>, DomainError>;

    /// Find an admin by email. Returns `None` if not found.
    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, DomainError>;
}

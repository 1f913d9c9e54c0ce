//! Product repository port.
//!
//! Every read and write that acts on behalf of a vendor is scoped by
//! `vendor_id`; a product belonging to another vendor behaves exactly as
//! if it did not exist.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ProductId, VendorId};
use crate::domain::product::Product;

/// Repository port for Product aggregate persistence.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Save a new product.
    async fn create(&self, product: &Product) -> Result<(), DomainError>;

    /// Persist changes to an existing product, scoped to its owner.
    ///
    /// # Errors
    ///
    /// - `ProductNotFound` if the id does not exist under that vendor
    async fn update(&self, product: &Product) -> Result<(), DomainError>;

    /// Find a product by id, scoped to the owning vendor.
    ///
    /// Returns `None` both for missing ids and for ids owned by a
    /// different vendor.
    async fn find_for_vendor(
        &self,
        id: &ProductId,
        vendor_id: &VendorId,
    ) -> Result<Option<Product>, DomainError>;

    /// Find a product by id without vendor scoping (admin use).
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError>;

    /// List all products owned by a vendor, newest first.
    async fn list_for_vendor(&self, vendor_id: &VendorId) -> Result<Vec<Product>, DomainError>;

    /// Delete a product, scoped to the owning vendor.
    ///
    /// # Errors
    ///
    /// - `ProductNotFound` if the id does not exist under that vendor
    async fn delete_for_vendor(
        &self,
        id: &ProductId,
        vendor_id: &VendorId,
    ) -> Result<(), DomainError>;
}

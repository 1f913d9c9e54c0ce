//! Product handlers: vendor-scoped CRUD and credential reveal.
//!
//! Plaintext credentials only exist in command payloads; they are
//! encrypted before any repository call and decrypted only for the
//! owning vendor's explicit reveal request.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, ProductId, VendorId};
use crate::domain::product::{PricingPlan, Product, ProductStatus, ServiceType};
use crate::ports::{CredentialCipher, ProductRepository};

fn product_not_found() -> DomainError {
    DomainError::new(ErrorCode::ProductNotFound, "Product not found")
}

/// Command to create a product listing.
#[derive(Debug, Clone)]
pub struct CreateProductCommand {
    pub vendor_id: VendorId,
    pub provider: String,
    pub service_type: ServiceType,
    pub plan: PricingPlan,
    pub stock_count: i32,
    /// Plaintext shared-account credential, if any.
    pub credential: Option<String>,
}

/// Handles product creation.
pub struct CreateProductHandler {
    products: Arc<dyn ProductRepository>,
    cipher: Arc<dyn CredentialCipher>,
}

impl CreateProductHandler {
    pub fn new(products: Arc<dyn ProductRepository>, cipher: Arc<dyn CredentialCipher>) -> Self {
        Self { products, cipher }
    }

    pub async fn handle(&self, cmd: CreateProductCommand) -> Result<Product, DomainError> {
        let mut product = Product::new(
            ProductId::new(),
            cmd.vendor_id,
            cmd.provider,
            cmd.service_type,
            cmd.plan,
            cmd.stock_count,
        )?;

        if let Some(plaintext) = cmd.credential {
            product.set_encrypted_credential(Some(self.cipher.encrypt(&plaintext)?));
        }

        self.products.create(&product).await?;
        tracing::info!(product_id = %product.id, vendor_id = %product.vendor_id, "product created");
        Ok(product)
    }
}

/// Command to update a product listing. `None` fields are left unchanged.
#[derive(Debug, Clone)]
pub struct UpdateProductCommand {
    pub vendor_id: VendorId,
    pub product_id: ProductId,
    pub provider: Option<String>,
    pub plan: Option<PricingPlan>,
    pub stock_count: Option<i32>,
    pub status: Option<ProductStatus>,
    /// Replacement plaintext credential, if supplied.
    pub credential: Option<String>,
}

/// Handles product updates, scoped to the owning vendor.
pub struct UpdateProductHandler {
    products: Arc<dyn ProductRepository>,
    cipher: Arc<dyn CredentialCipher>,
}

impl UpdateProductHandler {
    pub fn new(products: Arc<dyn ProductRepository>, cipher: Arc<dyn CredentialCipher>) -> Self {
        Self { products, cipher }
    }

    pub async fn handle(&self, cmd: UpdateProductCommand) -> Result<Product, DomainError> {
        let mut product = self
            .products
            .find_for_vendor(&cmd.product_id, &cmd.vendor_id)
            .await?
            .ok_or_else(product_not_found)?;

        if let Some(provider) = cmd.provider {
            if provider.trim().is_empty() {
                return Err(DomainError::validation("provider", "Provider cannot be empty"));
            }
            product.provider = provider;
        }
        if let Some(plan) = cmd.plan {
            product.plan = plan;
        }
        if let Some(stock) = cmd.stock_count {
            if stock < 0 {
                return Err(DomainError::validation(
                    "stock_count",
                    "Stock count cannot be negative",
                ));
            }
            product.stock_count = stock;
        }
        if let Some(status) = cmd.status {
            product.status = status;
        }
        if let Some(plaintext) = cmd.credential {
            product.set_encrypted_credential(Some(self.cipher.encrypt(&plaintext)?));
        }
        product.updated_at = crate::domain::foundation::Timestamp::now();

        self.products.update(&product).await?;
        Ok(product)
    }
}

/// Query for one product, scoped to the owning vendor.
pub struct GetProductHandler {
    products: Arc<dyn ProductRepository>,
}

impl GetProductHandler {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }

    pub async fn handle(
        &self,
        product_id: &ProductId,
        vendor_id: &VendorId,
    ) -> Result<Product, DomainError> {
        self.products
            .find_for_vendor(product_id, vendor_id)
            .await?
            .ok_or_else(product_not_found)
    }
}

/// Query for all of a vendor's products.
pub struct ListProductsHandler {
    products: Arc<dyn ProductRepository>,
}

impl ListProductsHandler {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }

    pub async fn handle(&self, vendor_id: &VendorId) -> Result<Vec<Product>, DomainError> {
        self.products.list_for_vendor(vendor_id).await
    }
}

/// Command to delete a product, scoped to the owning vendor.
pub struct DeleteProductHandler {
    products: Arc<dyn ProductRepository>,
}

impl DeleteProductHandler {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }

    pub async fn handle(
        &self,
        product_id: &ProductId,
        vendor_id: &VendorId,
    ) -> Result<(), DomainError> {
        self.products.delete_for_vendor(product_id, vendor_id).await?;
        tracing::info!(product_id = %product_id, vendor_id = %vendor_id, "product deleted");
        Ok(())
    }
}

/// Query to reveal a product's stored credential to its owner.
pub struct RevealCredentialHandler {
    products: Arc<dyn ProductRepository>,
    cipher: Arc<dyn CredentialCipher>,
}

impl RevealCredentialHandler {
    pub fn new(products: Arc<dyn ProductRepository>, cipher: Arc<dyn CredentialCipher>) -> Self {
        Self { products, cipher }
    }

    pub async fn handle(
        &self,
        product_id: &ProductId,
        vendor_id: &VendorId,
    ) -> Result<String, DomainError> {
        let product = self
            .products
            .find_for_vendor(product_id, vendor_id)
            .await?
            .ok_or_else(product_not_found)?;

        let stored = product.encrypted_credential.as_deref().ok_or_else(|| {
            DomainError::new(
                ErrorCode::ProductNotFound,
                "Product has no stored credential",
            )
        })?;

        self.cipher.decrypt(stored)
    }
}

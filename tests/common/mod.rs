//! Shared in-memory mock implementations of the repository ports.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use next_subscription::domain::foundation::{
    AdminId, DomainError, ErrorCode, ProductId, ProductRequestId, StockRequestId, VendorId,
};
use next_subscription::domain::fulfillment::StockRequest;
use next_subscription::domain::product::Product;
use next_subscription::domain::review::ProductRequest;
use next_subscription::domain::vendor::{Admin, Vendor};
use next_subscription::ports::{
    AdminRepository, PasswordHasher, ProductRepository, ProductRequestFilter,
    ProductRequestRepository, StockRequestFilter, StockRequestRepository, VendorRepository,
};

pub struct MockVendorRepository {
    pub vendors: Mutex<Vec<Vendor>>,
}

impl MockVendorRepository {
    pub fn new() -> Self {
        Self {
            vendors: Mutex::new(Vec::new()),
        }
    }

    pub fn with_vendor(vendor: Vendor) -> Self {
        Self {
            vendors: Mutex::new(vec![vendor]),
        }
    }
}

#[async_trait]
impl VendorRepository for MockVendorRepository {
    async fn create(&self, vendor: &Vendor) -> Result<(), DomainError> {
        self.vendors.lock().unwrap().push(vendor.clone());
        Ok(())
    }

    async fn update(&self, vendor: &Vendor) -> Result<(), DomainError> {
        let mut vendors = self.vendors.lock().unwrap();
        match vendors.iter().position(|v| v.id == vendor.id) {
            Some(pos) => {
                vendors[pos] = vendor.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::VendorNotFound,
                "Vendor not found",
            )),
        }
    }

    async fn find_by_id(&self, id: &VendorId) -> Result<Option<Vendor>, DomainError> {
        Ok(self
            .vendors
            .lock()
            .unwrap()
            .iter()
            .find(|v| &v.id == id)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Vendor>, DomainError> {
        Ok(self
            .vendors
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.primary_email.eq_ignore_ascii_case(email))
            .cloned())
    }
}

pub struct MockAdminRepository {
    pub admins: Mutex<Vec<Admin>>,
}

impl MockAdminRepository {
    pub fn with_admin(admin: Admin) -> Self {
        Self {
            admins: Mutex::new(vec![admin]),
        }
    }
}

#[async_trait]
impl AdminRepository for MockAdminRepository {
    async fn find_by_id(&self, id: &AdminId) -> Result<Option<Admin>, DomainError> {
        Ok(self
            .admins
            .lock()
            .unwrap()
            .iter()
            .find(|a| &a.id == id)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, DomainError> {
        Ok(self
            .admins
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(email))
            .cloned())
    }
}

pub struct MockProductRepository {
    pub products: Mutex<Vec<Product>>,
    /// When set, every write fails as if the database dropped out.
    pub fail_writes: AtomicBool,
}

impl MockProductRepository {
    pub fn new() -> Self {
        Self {
            products: Mutex::new(Vec::new()),
            fail_writes: AtomicBool::new(false),
        }
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writes(&self) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "Database write failed",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for MockProductRepository {
    async fn create(&self, product: &Product) -> Result<(), DomainError> {
        self.check_writes()?;
        self.products.lock().unwrap().push(product.clone());
        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<(), DomainError> {
        self.check_writes()?;
        let mut products = self.products.lock().unwrap();
        match products
            .iter()
            .position(|p| p.id == product.id && p.vendor_id == product.vendor_id)
        {
            Some(pos) => {
                products[pos] = product.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::ProductNotFound,
                "Product not found",
            )),
        }
    }

    async fn find_for_vendor(
        &self,
        id: &ProductId,
        vendor_id: &VendorId,
    ) -> Result<Option<Product>, DomainError> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .find(|p| &p.id == id && &p.vendor_id == vendor_id)
            .cloned())
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .find(|p| &p.id == id)
            .cloned())
    }

    async fn list_for_vendor(&self, vendor_id: &VendorId) -> Result<Vec<Product>, DomainError> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| &p.vendor_id == vendor_id)
            .cloned()
            .collect())
    }

    async fn delete_for_vendor(
        &self,
        id: &ProductId,
        vendor_id: &VendorId,
    ) -> Result<(), DomainError> {
        let mut products = self.products.lock().unwrap();
        match products
            .iter()
            .position(|p| &p.id == id && &p.vendor_id == vendor_id)
        {
            Some(pos) => {
                products.remove(pos);
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::ProductNotFound,
                "Product not found",
            )),
        }
    }
}

pub struct MockProductRequestRepository {
    pub requests: Mutex<Vec<ProductRequest>>,
    /// When set, every update fails as if the database dropped out.
    pub fail_updates: AtomicBool,
}

impl MockProductRequestRepository {
    pub fn new() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            fail_updates: AtomicBool::new(false),
        }
    }

    pub fn set_fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl ProductRequestRepository for MockProductRequestRepository {
    async fn create(&self, request: &ProductRequest) -> Result<(), DomainError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(())
    }

    async fn update(&self, request: &ProductRequest) -> Result<(), DomainError> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "Database write failed",
            ));
        }
        let mut requests = self.requests.lock().unwrap();
        match requests.iter().position(|r| r.id == request.id) {
            Some(pos) => {
                requests[pos] = request.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::ProductRequestNotFound,
                "Product request not found",
            )),
        }
    }

    async fn find_by_id(
        &self,
        id: &ProductRequestId,
    ) -> Result<Option<ProductRequest>, DomainError> {
        Ok(self
            .requests
            .lock()
            .unwrap()
            .iter()
            .find(|r| &r.id == id)
            .cloned())
    }

    async fn list(
        &self,
        filter: &ProductRequestFilter,
    ) -> Result<Vec<ProductRequest>, DomainError> {
        Ok(self
            .requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| filter.status.map_or(true, |s| r.status == s))
            .filter(|r| filter.vendor_id.map_or(true, |v| r.vendor_id == v))
            .cloned()
            .collect())
    }
}

pub struct MockStockRequestRepository {
    pub requests: Mutex<Vec<StockRequest>>,
}

impl MockStockRequestRepository {
    pub fn new() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_request(request: StockRequest) -> Self {
        Self {
            requests: Mutex::new(vec![request]),
        }
    }
}

#[async_trait]
impl StockRequestRepository for MockStockRequestRepository {
    async fn create(&self, request: &StockRequest) -> Result<(), DomainError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(())
    }

    async fn update_versioned(
        &self,
        request: &StockRequest,
        expected_version: i32,
    ) -> Result<(), DomainError> {
        let mut requests = self.requests.lock().unwrap();
        let stored = requests
            .iter_mut()
            .find(|r| r.id == request.id)
            .ok_or_else(|| {
                DomainError::new(ErrorCode::StockRequestNotFound, "Stock request not found")
            })?;
        if stored.version != expected_version {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                "Stock request was modified concurrently",
            ));
        }
        *stored = request.clone();
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &StockRequestId,
    ) -> Result<Option<StockRequest>, DomainError> {
        Ok(self
            .requests
            .lock()
            .unwrap()
            .iter()
            .find(|r| &r.id == id)
            .cloned())
    }

    async fn list(&self, filter: &StockRequestFilter) -> Result<Vec<StockRequest>, DomainError> {
        Ok(self
            .requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| filter.status.map_or(true, |s| r.status == s))
            .filter(|r| filter.vendor_id.map_or(true, |v| r.vendor_id == v))
            .cloned()
            .collect())
    }
}

/// Deterministic hasher for tests that do not exercise Argon2 itself.
pub struct PlainPasswordHasher;

impl PasswordHasher for PlainPasswordHasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        Ok(format!("plain:{}", password))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        Ok(hash == format!("plain:{}", password))
    }
}

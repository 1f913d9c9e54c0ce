//! Fulfillment handlers: opening stock requests and supplying stock
//! against them, manually or via CSV upload.

use std::sync::Arc;

use crate::domain::foundation::{
    AdminId, DomainError, ErrorCode, ProductId, StockRequestId, Timestamp, VendorId,
};
use crate::domain::fulfillment::{FulfillmentEntry, StockRequest};
use crate::ports::{
    CredentialCipher, ProductRepository, StockRequestFilter, StockRequestRepository,
};

fn stock_request_not_found() -> DomainError {
    DomainError::new(ErrorCode::StockRequestNotFound, "Stock request not found")
}

/// Parses CSV fulfillment text into entries.
///
/// Expected shape is `name,pin,credential` per line; pin and credential
/// may be empty or omitted. A header row (`name`, `name,pin`, or
/// `name,pin,credential`) as the first non-blank line is skipped; a data
/// row whose profile name merely begins with "name" is kept. Blank lines
/// are ignored.
pub fn parse_fulfillment_csv(csv: &str) -> Result<Vec<FulfillmentEntry>, DomainError> {
    fn is_header(line: &str) -> bool {
        let columns: Vec<String> = line
            .split(',')
            .map(|f| f.trim().to_ascii_lowercase())
            .collect();
        columns == ["name"] || columns == ["name", "pin"] || columns == ["name", "pin", "credential"]
    }

    let mut entries = Vec::new();
    let mut seen_data = false;
    for (idx, line) in csv.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if !seen_data {
            seen_data = true;
            if is_header(line) {
                continue;
            }
        }

        let mut fields = line.split(',').map(str::trim);
        let name = fields.next().unwrap_or_default();
        if name.is_empty() {
            return Err(DomainError::validation(
                "csv",
                format!("Line {}: profile name is required", idx + 1),
            ));
        }
        let pin = fields.next().filter(|f| !f.is_empty()).map(String::from);
        let credential = fields.next().filter(|f| !f.is_empty()).map(String::from);

        entries.push(FulfillmentEntry {
            name: name.to_string(),
            pin,
            credential,
        });
    }
    Ok(entries)
}

/// Command for an admin to open a stock request.
#[derive(Debug, Clone)]
pub struct CreateStockRequestCommand {
    pub admin_id: AdminId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub note: Option<String>,
}

/// Handles opening stock requests; the vendor is resolved from the
/// product being restocked.
pub struct CreateStockRequestHandler {
    stock_requests: Arc<dyn StockRequestRepository>,
    products: Arc<dyn ProductRepository>,
}

impl CreateStockRequestHandler {
    pub fn new(
        stock_requests: Arc<dyn StockRequestRepository>,
        products: Arc<dyn ProductRepository>,
    ) -> Self {
        Self {
            stock_requests,
            products,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateStockRequestCommand,
    ) -> Result<StockRequest, DomainError> {
        let product = self
            .products
            .find_by_id(&cmd.product_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::ProductNotFound, "Product not found"))?;

        let request = StockRequest::open(
            StockRequestId::new(),
            product.id,
            product.vendor_id,
            cmd.admin_id,
            cmd.quantity,
            cmd.note,
        )?;
        self.stock_requests.create(&request).await?;
        tracing::info!(
            request_id = %request.id,
            product_id = %product.id,
            quantity = cmd.quantity,
            "stock request opened"
        );
        Ok(request)
    }
}

/// Query over stock requests.
pub struct ListStockRequestsHandler {
    stock_requests: Arc<dyn StockRequestRepository>,
}

impl ListStockRequestsHandler {
    pub fn new(stock_requests: Arc<dyn StockRequestRepository>) -> Self {
        Self { stock_requests }
    }

    pub async fn handle(
        &self,
        filter: StockRequestFilter,
    ) -> Result<Vec<StockRequest>, DomainError> {
        self.stock_requests.list(&filter).await
    }
}

/// Command for a vendor to fulfill (part of) a stock request.
///
/// Entries may come from the manual form, an uploaded CSV, or both.
#[derive(Debug, Clone)]
pub struct FulfillStockRequestCommand {
    pub request_id: StockRequestId,
    pub vendor_id: VendorId,
    pub entries: Vec<FulfillmentEntry>,
    pub csv: Option<String>,
}

/// Outcome of a fulfillment submission.
#[derive(Debug)]
pub struct FulfillStockRequestResult {
    pub request: StockRequest,
    pub units_added: i32,
}

/// Handles fulfillment: appends profiles and stock to the product and
/// advances the request's quantity counters under its version guard.
pub struct FulfillStockRequestHandler {
    stock_requests: Arc<dyn StockRequestRepository>,
    products: Arc<dyn ProductRepository>,
    cipher: Arc<dyn CredentialCipher>,
}

impl FulfillStockRequestHandler {
    pub fn new(
        stock_requests: Arc<dyn StockRequestRepository>,
        products: Arc<dyn ProductRepository>,
        cipher: Arc<dyn CredentialCipher>,
    ) -> Self {
        Self {
            stock_requests,
            products,
            cipher,
        }
    }

    pub async fn handle(
        &self,
        cmd: FulfillStockRequestCommand,
    ) -> Result<FulfillStockRequestResult, DomainError> {
        let mut entries = cmd.entries;
        if let Some(csv) = cmd.csv.as_deref() {
            entries.extend(parse_fulfillment_csv(csv)?);
        }
        if entries.is_empty() {
            return Err(DomainError::validation(
                "entries",
                "Fulfillment requires at least one entry",
            ));
        }
        let units = i32::try_from(entries.len())
            .map_err(|_| DomainError::validation("entries", "Too many entries"))?;

        let mut request = self
            .stock_requests
            .find_by_id(&cmd.request_id)
            .await?
            .ok_or_else(stock_request_not_found)?;

        // Foreign requests behave as missing.
        if request.vendor_id != cmd.vendor_id {
            return Err(stock_request_not_found());
        }

        let expected_version = request.version;
        let prior = request.clone();
        request.record_fulfillment(units)?;

        let mut product = self
            .products
            .find_for_vendor(&request.product_id, &cmd.vendor_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::ProductNotFound, "Product not found"))?;

        let credential = entries
            .iter()
            .rev()
            .find_map(|e| e.credential.clone());

        let mut profiles = Vec::with_capacity(entries.len());
        for entry in entries {
            profiles.push(entry.into_profile()?);
        }

        if let Some(plaintext) = credential {
            product.set_encrypted_credential(Some(self.cipher.encrypt(&plaintext)?));
        }
        product.add_inventory(profiles, units)?;

        // The version guard decides the race; only the winner's product
        // update is applied.
        self.stock_requests
            .update_versioned(&request, expected_version)
            .await?;

        if let Err(err) = self.products.update(&product).await {
            // The counters already advanced but the stock never landed.
            // Roll them back under the guard so the vendor can retry the
            // same entries.
            let mut restored = prior;
            restored.version = request.version + 1;
            restored.updated_at = Timestamp::now();
            if let Err(rollback_err) = self
                .stock_requests
                .update_versioned(&restored, request.version)
                .await
            {
                tracing::error!(
                    request_id = %request.id,
                    error = %rollback_err,
                    "stock request counter rollback failed"
                );
            }
            return Err(err);
        }

        tracing::info!(
            request_id = %request.id,
            units,
            remaining = request.remaining(),
            "stock request fulfillment recorded"
        );
        Ok(FulfillStockRequestResult {
            request,
            units_added: units,
        })
    }
}

/// Command for a vendor to decline a stock request.
#[derive(Debug, Clone)]
pub struct RejectStockRequestCommand {
    pub request_id: StockRequestId,
    pub vendor_id: VendorId,
    pub reason: Option<String>,
}

/// Handles vendor rejection of stock requests.
pub struct RejectStockRequestHandler {
    stock_requests: Arc<dyn StockRequestRepository>,
}

impl RejectStockRequestHandler {
    pub fn new(stock_requests: Arc<dyn StockRequestRepository>) -> Self {
        Self { stock_requests }
    }

    pub async fn handle(&self, cmd: RejectStockRequestCommand) -> Result<StockRequest, DomainError> {
        let mut request = self
            .stock_requests
            .find_by_id(&cmd.request_id)
            .await?
            .ok_or_else(stock_request_not_found)?;

        if request.vendor_id != cmd.vendor_id {
            return Err(stock_request_not_found());
        }

        let expected_version = request.version;
        request.reject(cmd.reason)?;
        self.stock_requests
            .update_versioned(&request, expected_version)
            .await?;
        Ok(request)
    }
}

/// Command for an admin to withdraw a stock request.
pub struct CancelStockRequestHandler {
    stock_requests: Arc<dyn StockRequestRepository>,
}

impl CancelStockRequestHandler {
    pub fn new(stock_requests: Arc<dyn StockRequestRepository>) -> Self {
        Self { stock_requests }
    }

    pub async fn handle(&self, request_id: &StockRequestId) -> Result<StockRequest, DomainError> {
        let mut request = self
            .stock_requests
            .find_by_id(request_id)
            .await?
            .ok_or_else(stock_request_not_found)?;

        let expected_version = request.version;
        request.cancel()?;
        self.stock_requests
            .update_versioned(&request, expected_version)
            .await?;
        Ok(request)
    }
}

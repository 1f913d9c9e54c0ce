//! PostgreSQL implementation of the ProductRepository port.
//!
//! Profiles are stored as a JSONB column; the plan is flattened into
//! scalar columns. Vendor scoping happens in SQL, not in application
//! code, so a foreign vendor's product can never leave the database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, ProductId, Timestamp, VendorId};
use crate::domain::product::{
    AccountProfile, PricingPlan, Product, ProductStatus, ServiceType,
};
use crate::ports::ProductRepository;

/// PostgreSQL implementation of the ProductRepository port.
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    /// Creates a repository backed by the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a product.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    vendor_id: Uuid,
    provider: String,
    service_type: String,
    plan_duration_months: i32,
    plan_price_cents: i64,
    plan_currency: String,
    stock_count: i32,
    status: String,
    encrypted_credential: Option<String>,
    profiles: serde_json::Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = DomainError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let profiles: Vec<AccountProfile> = serde_json::from_value(row.profiles)
            .map_err(|e| DomainError::database(format!("Invalid profiles JSON: {}", e)))?;

        Ok(Product {
            id: ProductId::from_uuid(row.id),
            vendor_id: VendorId::from_uuid(row.vendor_id),
            provider: row.provider,
            service_type: parse_service_type(&row.service_type)?,
            plan: PricingPlan {
                duration_months: row.plan_duration_months,
                price_cents: row.plan_price_cents,
                currency: row.plan_currency,
            },
            stock_count: row.stock_count,
            status: parse_product_status(&row.status)?,
            encrypted_credential: row.encrypted_credential,
            profiles,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

pub(super) fn parse_service_type(s: &str) -> Result<ServiceType, DomainError> {
    match s {
        "account_share" => Ok(ServiceType::AccountShare),
        "email_invite" => Ok(ServiceType::EmailInvite),
        "license_key" => Ok(ServiceType::LicenseKey),
        "other" => Ok(ServiceType::Other),
        _ => Err(DomainError::database(format!(
            "Invalid service type value: {}",
            s
        ))),
    }
}

fn parse_product_status(s: &str) -> Result<ProductStatus, DomainError> {
    match s {
        "draft" => Ok(ProductStatus::Draft),
        "pending" => Ok(ProductStatus::Pending),
        "active" => Ok(ProductStatus::Active),
        "inactive" => Ok(ProductStatus::Inactive),
        _ => Err(DomainError::database(format!(
            "Invalid product status value: {}",
            s
        ))),
    }
}

fn profiles_json(product: &Product) -> Result<serde_json::Value, DomainError> {
    serde_json::to_value(&product.profiles)
        .map_err(|e| DomainError::database(format!("Failed to serialize profiles: {}", e)))
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn create(&self, product: &Product) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO products (
                id, vendor_id, provider, service_type,
                plan_duration_months, plan_price_cents, plan_currency,
                stock_count, status, encrypted_credential, profiles,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(product.id.as_uuid())
        .bind(product.vendor_id.as_uuid())
        .bind(&product.provider)
        .bind(product.service_type.to_string())
        .bind(product.plan.duration_months)
        .bind(product.plan.price_cents)
        .bind(&product.plan.currency)
        .bind(product.stock_count)
        .bind(product.status.to_string())
        .bind(&product.encrypted_credential)
        .bind(profiles_json(product)?)
        .bind(product.created_at.as_datetime())
        .bind(product.updated_at.as_datetime())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE products SET
                provider = $3, service_type = $4,
                plan_duration_months = $5, plan_price_cents = $6,
                plan_currency = $7, stock_count = $8, status = $9,
                encrypted_credential = $10, profiles = $11, updated_at = $12
            WHERE id = $1 AND vendor_id = $2
            "#,
        )
        .bind(product.id.as_uuid())
        .bind(product.vendor_id.as_uuid())
        .bind(&product.provider)
        .bind(product.service_type.to_string())
        .bind(product.plan.duration_months)
        .bind(product.plan.price_cents)
        .bind(&product.plan.currency)
        .bind(product.stock_count)
        .bind(product.status.to_string())
        .bind(&product.encrypted_credential)
        .bind(profiles_json(product)?)
        .bind(product.updated_at.as_datetime())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ProductNotFound,
                "Product not found",
            ));
        }
        Ok(())
    }

    async fn find_for_vendor(
        &self,
        id: &ProductId,
        vendor_id: &VendorId,
    ) -> Result<Option<Product>, DomainError> {
        let row: Option<ProductRow> =
            sqlx::query_as("SELECT * FROM products WHERE id = $1 AND vendor_id = $2")
                .bind(id.as_uuid())
                .bind(vendor_id.as_uuid())
                .fetch_optional(&self.pool)
                .await?;
        row.map(Product::try_from).transpose()
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError> {
        let row: Option<ProductRow> = sqlx::query_as("SELECT * FROM products WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;
        row.map(Product::try_from).transpose()
    }

    async fn list_for_vendor(&self, vendor_id: &VendorId) -> Result<Vec<Product>, DomainError> {
        let rows: Vec<ProductRow> = sqlx::query_as(
            "SELECT * FROM products WHERE vendor_id = $1 ORDER BY created_at DESC",
        )
        .bind(vendor_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Product::try_from).collect()
    }

    async fn delete_for_vendor(
        &self,
        id: &ProductId,
        vendor_id: &VendorId,
    ) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1 AND vendor_id = $2")
            .bind(id.as_uuid())
            .bind(vendor_id.as_uuid())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ProductNotFound,
                "Product not found",
            ));
        }
        Ok(())
    }
}

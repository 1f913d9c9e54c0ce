//! PostgreSQL implementations of the account repositories.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{AdminId, DomainError, ErrorCode, Timestamp, VendorId};
use crate::domain::vendor::{Admin, Vendor, VendorProfile, VendorStatus};
use crate::ports::{AdminRepository, VendorRepository};

/// PostgreSQL implementation of the VendorRepository port.
pub struct PostgresVendorRepository {
    pool: PgPool,
}

impl PostgresVendorRepository {
    /// Creates a repository backed by the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a vendor.
#[derive(Debug, sqlx::FromRow)]
struct VendorRow {
    id: Uuid,
    company_name: String,
    primary_email: String,
    password_hash: String,
    status: String,
    owner_name: String,
    business_hours: Option<String>,
    logo_url: Option<String>,
    additional_emails: Vec<String>,
    initial_password_set: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<VendorRow> for Vendor {
    type Error = DomainError;

    fn try_from(row: VendorRow) -> Result<Self, Self::Error> {
        Ok(Vendor {
            id: VendorId::from_uuid(row.id),
            company_name: row.company_name,
            primary_email: row.primary_email,
            password_hash: row.password_hash,
            status: parse_vendor_status(&row.status)?,
            profile: VendorProfile {
                owner_name: row.owner_name,
                business_hours: row.business_hours,
                logo_url: row.logo_url,
                additional_emails: row.additional_emails,
            },
            initial_password_set: row.initial_password_set,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn parse_vendor_status(s: &str) -> Result<VendorStatus, DomainError> {
    match s {
        "pending" => Ok(VendorStatus::Pending),
        "active" => Ok(VendorStatus::Active),
        "suspended" => Ok(VendorStatus::Suspended),
        "rejected" => Ok(VendorStatus::Rejected),
        _ => Err(DomainError::database(format!(
            "Invalid vendor status value: {}",
            s
        ))),
    }
}

#[async_trait]
impl VendorRepository for PostgresVendorRepository {
    async fn create(&self, vendor: &Vendor) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO vendors (
                id, company_name, primary_email, password_hash, status,
                owner_name, business_hours, logo_url, additional_emails,
                initial_password_set, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(vendor.id.as_uuid())
        .bind(&vendor.company_name)
        .bind(&vendor.primary_email)
        .bind(&vendor.password_hash)
        .bind(vendor.status.to_string())
        .bind(&vendor.profile.owner_name)
        .bind(&vendor.profile.business_hours)
        .bind(&vendor.profile.logo_url)
        .bind(&vendor.profile.additional_emails)
        .bind(vendor.initial_password_set)
        .bind(vendor.created_at.as_datetime())
        .bind(vendor.updated_at.as_datetime())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update(&self, vendor: &Vendor) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE vendors SET
                company_name = $2, primary_email = $3, password_hash = $4,
                status = $5, owner_name = $6, business_hours = $7,
                logo_url = $8, additional_emails = $9,
                initial_password_set = $10, updated_at = $11
            WHERE id = $1
            "#,
        )
        .bind(vendor.id.as_uuid())
        .bind(&vendor.company_name)
        .bind(&vendor.primary_email)
        .bind(&vendor.password_hash)
        .bind(vendor.status.to_string())
        .bind(&vendor.profile.owner_name)
        .bind(&vendor.profile.business_hours)
        .bind(&vendor.profile.logo_url)
        .bind(&vendor.profile.additional_emails)
        .bind(vendor.initial_password_set)
        .bind(vendor.updated_at.as_datetime())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::VendorNotFound,
                "Vendor not found",
            ));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &VendorId) -> Result<Option<Vendor>, DomainError> {
        let row: Option<VendorRow> =
            sqlx::query_as("SELECT * FROM vendors WHERE id = $1")
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await?;
        row.map(Vendor::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Vendor>, DomainError> {
        let row: Option<VendorRow> =
            sqlx::query_as("SELECT * FROM vendors WHERE lower(primary_email) = lower($1)")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;
        row.map(Vendor::try_from).transpose()
    }
}

/// PostgreSQL implementation of the AdminRepository port.
pub struct PostgresAdminRepository {
    pool: PgPool,
}

impl PostgresAdminRepository {
    /// Creates a repository backed by the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of an admin.
#[derive(Debug, sqlx::FromRow)]
struct AdminRow {
    id: Uuid,
    email: String,
    password_hash: String,
    display_name: String,
    created_at: DateTime<Utc>,
}

impl From<AdminRow> for Admin {
    fn from(row: AdminRow) -> Self {
        Admin {
            id: AdminId::from_uuid(row.id),
            email: row.email,
            password_hash: row.password_hash,
            display_name: row.display_name,
            created_at: Timestamp::from_datetime(row.created_at),
        }
    }
}

#[async_trait]
impl AdminRepository for PostgresAdminRepository {
    async fn find_by_id(&self, id: &AdminId) -> Result<Option<Admin>, DomainError> {
        let row: Option<AdminRow> = sqlx::query_as("SELECT * FROM admins WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Admin::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, DomainError> {
        let row: Option<AdminRow> =
            sqlx::query_as("SELECT * FROM admins WHERE lower(email) = lower($1)")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(Admin::from))
    }
}

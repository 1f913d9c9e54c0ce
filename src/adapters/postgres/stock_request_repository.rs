//! PostgreSQL implementation of the StockRequestRepository port.
//!
//! Updates are optimistic: the UPDATE is conditioned on the version the
//! caller read, so concurrent fulfillments cannot both apply. A stale
//! version surfaces as `Conflict` and the caller retries from a fresh
//! read.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    AdminId, DomainError, ErrorCode, ProductId, StockRequestId, Timestamp, VendorId,
};
use crate::domain::fulfillment::{StockRequest, StockRequestStatus};
use crate::ports::{StockRequestFilter, StockRequestRepository};

/// PostgreSQL implementation of the StockRequestRepository port.
pub struct PostgresStockRequestRepository {
    pool: PgPool,
}

impl PostgresStockRequestRepository {
    /// Creates a repository backed by the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a stock request.
#[derive(Debug, sqlx::FromRow)]
struct StockRequestRow {
    id: Uuid,
    product_id: Uuid,
    vendor_id: Uuid,
    requested_by: Uuid,
    quantity_requested: i32,
    quantity_fulfilled: i32,
    status: String,
    note: Option<String>,
    version: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<StockRequestRow> for StockRequest {
    type Error = DomainError;

    fn try_from(row: StockRequestRow) -> Result<Self, Self::Error> {
        Ok(StockRequest {
            id: StockRequestId::from_uuid(row.id),
            product_id: ProductId::from_uuid(row.product_id),
            vendor_id: VendorId::from_uuid(row.vendor_id),
            requested_by: AdminId::from_uuid(row.requested_by),
            quantity_requested: row.quantity_requested,
            quantity_fulfilled: row.quantity_fulfilled,
            status: parse_stock_status(&row.status)?,
            note: row.note,
            version: row.version,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn parse_stock_status(s: &str) -> Result<StockRequestStatus, DomainError> {
    match s {
        "requested" => Ok(StockRequestStatus::Requested),
        "partially_fulfilled" => Ok(StockRequestStatus::PartiallyFulfilled),
        "fulfilled" => Ok(StockRequestStatus::Fulfilled),
        "rejected" => Ok(StockRequestStatus::Rejected),
        "cancelled" => Ok(StockRequestStatus::Cancelled),
        _ => Err(DomainError::database(format!(
            "Invalid stock request status value: {}",
            s
        ))),
    }
}

#[async_trait]
impl StockRequestRepository for PostgresStockRequestRepository {
    async fn create(&self, request: &StockRequest) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO stock_requests (
                id, product_id, vendor_id, requested_by,
                quantity_requested, quantity_fulfilled, status, note,
                version, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(request.id.as_uuid())
        .bind(request.product_id.as_uuid())
        .bind(request.vendor_id.as_uuid())
        .bind(request.requested_by.as_uuid())
        .bind(request.quantity_requested)
        .bind(request.quantity_fulfilled)
        .bind(request.status.to_string())
        .bind(&request.note)
        .bind(request.version)
        .bind(request.created_at.as_datetime())
        .bind(request.updated_at.as_datetime())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_versioned(
        &self,
        request: &StockRequest,
        expected_version: i32,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE stock_requests SET
                quantity_fulfilled = $3, status = $4, note = $5,
                version = $6, updated_at = $7
            WHERE id = $1 AND version = $2
            "#,
        )
        .bind(request.id.as_uuid())
        .bind(expected_version)
        .bind(request.quantity_fulfilled)
        .bind(request.status.to_string())
        .bind(&request.note)
        .bind(request.version)
        .bind(request.updated_at.as_datetime())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            // Distinguish a missing row from a stale version.
            let exists: Option<(i32,)> =
                sqlx::query_as("SELECT version FROM stock_requests WHERE id = $1")
                    .bind(request.id.as_uuid())
                    .fetch_optional(&self.pool)
                    .await?;
            return match exists {
                Some(_) => Err(DomainError::new(
                    ErrorCode::Conflict,
                    "Stock request was modified concurrently",
                )),
                None => Err(DomainError::new(
                    ErrorCode::StockRequestNotFound,
                    "Stock request not found",
                )),
            };
        }
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &StockRequestId,
    ) -> Result<Option<StockRequest>, DomainError> {
        let row: Option<StockRequestRow> =
            sqlx::query_as("SELECT * FROM stock_requests WHERE id = $1")
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await?;
        row.map(StockRequest::try_from).transpose()
    }

    async fn list(&self, filter: &StockRequestFilter) -> Result<Vec<StockRequest>, DomainError> {
        let rows: Vec<StockRequestRow> = sqlx::query_as(
            r#"
            SELECT * FROM stock_requests
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::uuid IS NULL OR vendor_id = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(filter.status.map(|s| s.to_string()))
        .bind(filter.vendor_id.map(|v| *v.as_uuid()))
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(StockRequest::try_from).collect()
    }
}

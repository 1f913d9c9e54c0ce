//! PostgreSQL implementation of the ProductRequestRepository port.
//!
//! Pricing plans and the review history are stored as JSONB columns;
//! attachments as a text array.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, ProductRequestId, Timestamp, VendorId};
use crate::domain::product::PricingPlan;
use crate::domain::review::{ProductRequest, ProductRequestDraft, ReviewDecision, ReviewStatus};
use crate::ports::{ProductRequestFilter, ProductRequestRepository};

use super::product_repository::parse_service_type;

/// PostgreSQL implementation of the ProductRequestRepository port.
pub struct PostgresProductRequestRepository {
    pool: PgPool,
}

impl PostgresProductRequestRepository {
    /// Creates a repository backed by the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a product request.
#[derive(Debug, sqlx::FromRow)]
struct ProductRequestRow {
    id: Uuid,
    vendor_id: Uuid,
    provider: String,
    service_type: String,
    plans: serde_json::Value,
    initial_stock: i32,
    attachments: Vec<String>,
    status: String,
    review_history: serde_json::Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRequestRow> for ProductRequest {
    type Error = DomainError;

    fn try_from(row: ProductRequestRow) -> Result<Self, Self::Error> {
        let plans: Vec<PricingPlan> = serde_json::from_value(row.plans)
            .map_err(|e| DomainError::database(format!("Invalid plans JSON: {}", e)))?;
        let review_history: Vec<ReviewDecision> = serde_json::from_value(row.review_history)
            .map_err(|e| DomainError::database(format!("Invalid review history JSON: {}", e)))?;

        Ok(ProductRequest {
            id: ProductRequestId::from_uuid(row.id),
            vendor_id: VendorId::from_uuid(row.vendor_id),
            draft: ProductRequestDraft {
                provider: row.provider,
                service_type: parse_service_type(&row.service_type)?,
                plans,
                initial_stock: row.initial_stock,
                attachments: row.attachments,
            },
            status: parse_review_status(&row.status)?,
            review_history,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn parse_review_status(s: &str) -> Result<ReviewStatus, DomainError> {
    match s {
        "pending_review" => Ok(ReviewStatus::PendingReview),
        "approved" => Ok(ReviewStatus::Approved),
        "rejected" => Ok(ReviewStatus::Rejected),
        "changes_requested" => Ok(ReviewStatus::ChangesRequested),
        _ => Err(DomainError::database(format!(
            "Invalid review status value: {}",
            s
        ))),
    }
}

fn to_json<T: serde::Serialize>(value: &T, what: &str) -> Result<serde_json::Value, DomainError> {
    serde_json::to_value(value)
        .map_err(|e| DomainError::database(format!("Failed to serialize {}: {}", what, e)))
}

#[async_trait]
impl ProductRequestRepository for PostgresProductRequestRepository {
    async fn create(&self, request: &ProductRequest) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO product_requests (
                id, vendor_id, provider, service_type, plans, initial_stock,
                attachments, status, review_history, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(request.id.as_uuid())
        .bind(request.vendor_id.as_uuid())
        .bind(&request.draft.provider)
        .bind(request.draft.service_type.to_string())
        .bind(to_json(&request.draft.plans, "plans")?)
        .bind(request.draft.initial_stock)
        .bind(&request.draft.attachments)
        .bind(request.status.to_string())
        .bind(to_json(&request.review_history, "review history")?)
        .bind(request.created_at.as_datetime())
        .bind(request.updated_at.as_datetime())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update(&self, request: &ProductRequest) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE product_requests SET
                provider = $2, service_type = $3, plans = $4,
                initial_stock = $5, attachments = $6, status = $7,
                review_history = $8, updated_at = $9
            WHERE id = $1
            "#,
        )
        .bind(request.id.as_uuid())
        .bind(&request.draft.provider)
        .bind(request.draft.service_type.to_string())
        .bind(to_json(&request.draft.plans, "plans")?)
        .bind(request.draft.initial_stock)
        .bind(&request.draft.attachments)
        .bind(request.status.to_string())
        .bind(to_json(&request.review_history, "review history")?)
        .bind(request.updated_at.as_datetime())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ProductRequestNotFound,
                "Product request not found",
            ));
        }
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &ProductRequestId,
    ) -> Result<Option<ProductRequest>, DomainError> {
        let row: Option<ProductRequestRow> =
            sqlx::query_as("SELECT * FROM product_requests WHERE id = $1")
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await?;
        row.map(ProductRequest::try_from).transpose()
    }

    async fn list(
        &self,
        filter: &ProductRequestFilter,
    ) -> Result<Vec<ProductRequest>, DomainError> {
        let rows: Vec<ProductRequestRow> = sqlx::query_as(
            r#"
            SELECT * FROM product_requests
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::uuid IS NULL OR vendor_id = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(filter.status.map(|s| s.to_string()))
        .bind(filter.vendor_id.map(|v| *v.as_uuid()))
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(ProductRequest::try_from).collect()
    }
}

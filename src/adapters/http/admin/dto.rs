//! Request and response DTOs for the admin surface.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ProductId, VendorId};
use crate::domain::fulfillment::StockRequestStatus;
use crate::domain::review::ReviewStatus;

use super::super::dto::{ProductRequestView, ProductView};

/// Login credentials.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response payload.
#[derive(Debug, Serialize)]
pub struct AdminLoginView {
    pub admin_id: String,
    pub display_name: String,
}

/// Query filters for the review queue.
#[derive(Debug, Default, Deserialize)]
pub struct ReviewQueueQuery {
    pub status: Option<ReviewStatus>,
    pub vendor_id: Option<VendorId>,
}

/// Decision payload; comment required for reject and request-changes.
#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    #[serde(default)]
    pub comment: Option<String>,
}

/// Outcome of an admin decision. `created_product` is set on approval.
#[derive(Debug, Serialize)]
pub struct DecisionOutcomeView {
    pub request: ProductRequestView,
    pub created_product: Option<ProductView>,
}

/// Payload to open a stock request.
#[derive(Debug, Deserialize)]
pub struct CreateStockRequestBody {
    pub product_id: ProductId,
    pub quantity: i32,
    #[serde(default)]
    pub note: Option<String>,
}

/// Query filters for the stock request list.
#[derive(Debug, Default, Deserialize)]
pub struct StockRequestQuery {
    pub status: Option<StockRequestStatus>,
    pub vendor_id: Option<VendorId>,
}

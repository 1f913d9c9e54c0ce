//! Response views shared by the vendor and admin surfaces.
//!
//! These types define what the JSON API exposes of each aggregate. The
//! product view deliberately has no credential field; the stored
//! ciphertext never leaves the server and the plaintext is only returned
//! by the explicit reveal endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::DomainError;
use crate::domain::fulfillment::{StockRequest, StockRequestStatus};
use crate::domain::product::{PricingPlan, Product, ProductStatus, ServiceType};
use crate::domain::review::{ProductRequest, ReviewDecision, ReviewStatus};

/// Pricing plan as accepted on write; validated into [`PricingPlan`].
#[derive(Debug, Clone, Deserialize)]
pub struct PricingPlanDto {
    pub duration_months: i32,
    pub price_cents: i64,
    pub currency: String,
}

impl PricingPlanDto {
    pub fn into_plan(self) -> Result<PricingPlan, DomainError> {
        PricingPlan::new(self.duration_months, self.price_cents, self.currency)
    }
}

/// One profile slot on a shared account.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub name: String,
    pub pin: Option<String>,
    pub assigned: bool,
}

/// Product listing as exposed to the API.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub id: String,
    pub vendor_id: String,
    pub provider: String,
    pub service_type: ServiceType,
    pub plan: PricingPlan,
    pub stock_count: i32,
    pub status: ProductStatus,
    pub has_credential: bool,
    pub profiles: Vec<ProfileView>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.to_string(),
            vendor_id: product.vendor_id.to_string(),
            provider: product.provider,
            service_type: product.service_type,
            plan: product.plan,
            stock_count: product.stock_count,
            status: product.status,
            has_credential: product.encrypted_credential.is_some(),
            profiles: product
                .profiles
                .into_iter()
                .map(|p| ProfileView {
                    name: p.name,
                    pin: p.pin,
                    assigned: p.assigned,
                })
                .collect(),
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

/// One decision in a proposal's audit trail.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewDecisionView {
    pub action: String,
    pub comment: Option<String>,
    pub admin_id: String,
    pub decided_at: String,
}

impl From<&ReviewDecision> for ReviewDecisionView {
    fn from(decision: &ReviewDecision) -> Self {
        Self {
            action: decision.action.to_string(),
            comment: decision.comment.clone(),
            admin_id: decision.admin_id.to_string(),
            decided_at: decision.decided_at.to_string(),
        }
    }
}

/// Proposal as exposed to the API.
#[derive(Debug, Clone, Serialize)]
pub struct ProductRequestView {
    pub id: String,
    pub vendor_id: String,
    pub provider: String,
    pub service_type: ServiceType,
    pub plans: Vec<PricingPlan>,
    pub initial_stock: i32,
    pub attachments: Vec<String>,
    pub status: ReviewStatus,
    pub latest_comment: Option<String>,
    pub review_history: Vec<ReviewDecisionView>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ProductRequest> for ProductRequestView {
    fn from(request: ProductRequest) -> Self {
        let latest_comment = request.latest_comment().map(str::to_string);
        Self {
            id: request.id.to_string(),
            vendor_id: request.vendor_id.to_string(),
            provider: request.draft.provider,
            service_type: request.draft.service_type,
            plans: request.draft.plans,
            initial_stock: request.draft.initial_stock,
            attachments: request.draft.attachments,
            status: request.status,
            latest_comment,
            review_history: request.review_history.iter().map(Into::into).collect(),
            created_at: request.created_at.to_string(),
            updated_at: request.updated_at.to_string(),
        }
    }
}

/// Stock request as exposed to the API.
#[derive(Debug, Clone, Serialize)]
pub struct StockRequestView {
    pub id: String,
    pub product_id: String,
    pub vendor_id: String,
    pub quantity_requested: i32,
    pub quantity_fulfilled: i32,
    pub remaining: i32,
    pub status: StockRequestStatus,
    pub note: Option<String>,
    pub version: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<StockRequest> for StockRequestView {
    fn from(request: StockRequest) -> Self {
        let remaining = request.remaining();
        Self {
            id: request.id.to_string(),
            product_id: request.product_id.to_string(),
            vendor_id: request.vendor_id.to_string(),
            quantity_requested: request.quantity_requested,
            quantity_fulfilled: request.quantity_fulfilled,
            remaining,
            status: request.status,
            note: request.note,
            version: request.version,
            created_at: request.created_at.to_string(),
            updated_at: request.updated_at.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ProductId, VendorId};

    #[test]
    fn product_view_carries_no_ciphertext() {
        let mut product = Product::new(
            ProductId::new(),
            VendorId::new(),
            "Netflix",
            ServiceType::AccountShare,
            PricingPlan::new(1, 4_99, "USD").unwrap(),
            3,
        )
        .unwrap();
        product.set_encrypted_credential(Some("aabb:ccdd".into()));

        let view: ProductView = product.into();
        assert!(view.has_credential);

        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("aabb:ccdd"));
        assert!(!json.contains("encrypted_credential"));
    }
}

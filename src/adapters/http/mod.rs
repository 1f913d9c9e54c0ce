//! HTTP adapters - the REST API surface.
//!
//! The vendor and admin surfaces each get their own dto/handlers/routes
//! module; `build_router` assembles them behind the shared session
//! middleware and the unauthenticated health probe.

pub mod admin;
pub mod cookies;
pub mod dto;
pub mod middleware;
pub mod response;
pub mod vendor;

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

pub use admin::{admin_routes, AdminAppState};
pub use cookies::SessionCookie;
pub use middleware::{auth_middleware, AuthState, RequireAdmin, RequireVendor};
pub use response::{ApiError, ApiResponse, ApiResult};
pub use vendor::{vendor_routes, VendorAppState};

/// `GET /health` - liveness probe.
async fn health() -> (StatusCode, Json<ApiResponse<()>>) {
    (StatusCode::OK, Json(ApiResponse::ok_empty("OK")))
}

/// Assembles the full application router.
pub fn build_router(
    vendor_state: VendorAppState,
    admin_state: AdminAppState,
    validator: AuthState,
) -> Router {
    Router::new()
        .nest("/api/vendor", vendor_routes().with_state(vendor_state))
        .nest("/api/admin", admin_routes().with_state(admin_state))
        .layer(axum::middleware::from_fn_with_state(
            validator,
            auth_middleware,
        ))
        .route("/health", get(health))
}

//! Axum router for the admin surface.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    approve_proposal, cancel_stock_request, create_stock_request, get_proposal,
    list_review_queue, list_stock_requests, login, logout, reject_proposal, request_changes,
    AdminAppState,
};

/// Routes mounted at `/api/admin`.
///
/// - `POST /auth/login`, `POST /auth/logout`
/// - `GET /product-requests?status=&vendor_id=`, `GET /product-requests/:id`
/// - `POST /product-requests/:id/approve | /reject | /request-changes`
/// - `GET/POST /stock-requests`, `POST /stock-requests/:id/cancel`
pub fn admin_routes() -> Router<AdminAppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/product-requests", get(list_review_queue))
        .route("/product-requests/:id", get(get_proposal))
        .route("/product-requests/:id/approve", post(approve_proposal))
        .route("/product-requests/:id/reject", post(reject_proposal))
        .route("/product-requests/:id/request-changes", post(request_changes))
        .route(
            "/stock-requests",
            get(list_stock_requests).post(create_stock_request),
        )
        .route("/stock-requests/:id/cancel", post(cancel_stock_request))
}

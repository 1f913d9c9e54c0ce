//! HTTP handlers for the admin surface.

use std::sync::Arc;

use axum::extract::{Json, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;

use crate::application::handlers::auth::{AdminLoginCommand, AdminLoginHandler};
use crate::application::handlers::fulfillment::{
    CancelStockRequestHandler, CreateStockRequestCommand, CreateStockRequestHandler,
    ListStockRequestsHandler,
};
use crate::application::handlers::review::{
    GetProductRequestHandler, ListProductRequestsHandler, ReviewProductRequestCommand,
    ReviewProductRequestHandler,
};
use crate::domain::foundation::{ProductRequestId, StockRequestId};
use crate::domain::review::ReviewAction;
use crate::ports::{
    AdminRepository, PasswordHasher, ProductRepository, ProductRequestFilter,
    ProductRequestRepository, StockRequestFilter, StockRequestRepository, TokenIssuer,
};

use super::super::cookies::SessionCookie;
use super::super::dto::{ProductRequestView, StockRequestView};
use super::super::middleware::RequireAdmin;
use super::super::response::{ApiError, ApiResponse, ApiResult};
use super::dto::{
    AdminLoginView, CreateStockRequestBody, DecisionOutcomeView, DecisionRequest, LoginRequest,
    ReviewQueueQuery, StockRequestQuery,
};

/// Shared state for the admin surface.
#[derive(Clone)]
pub struct AdminAppState {
    pub admins: Arc<dyn AdminRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub product_requests: Arc<dyn ProductRequestRepository>,
    pub stock_requests: Arc<dyn StockRequestRepository>,
    pub password_hasher: Arc<dyn PasswordHasher>,
    pub token_issuer: Arc<dyn TokenIssuer>,
    pub session_cookie: SessionCookie,
}

impl AdminAppState {
    fn login_handler(&self) -> AdminLoginHandler {
        AdminLoginHandler::new(
            self.admins.clone(),
            self.password_hasher.clone(),
            self.token_issuer.clone(),
        )
    }

    fn review_handler(&self) -> ReviewProductRequestHandler {
        ReviewProductRequestHandler::new(self.product_requests.clone(), self.products.clone())
    }

    fn create_stock_request_handler(&self) -> CreateStockRequestHandler {
        CreateStockRequestHandler::new(self.stock_requests.clone(), self.products.clone())
    }
}

/// `POST /api/admin/auth/login`
pub async fn login(
    State(state): State<AdminAppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .login_handler()
        .handle(AdminLoginCommand {
            email: body.email,
            password: body.password,
        })
        .await?;

    let cookie = state.session_cookie.issue(&result.token);
    let response = ApiResponse::ok(
        "Logged in",
        AdminLoginView {
            admin_id: result.admin_id,
            display_name: result.display_name,
        },
    );
    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(response),
    ))
}

/// `POST /api/admin/auth/logout`
pub async fn logout(State(state): State<AdminAppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::SET_COOKIE, state.session_cookie.clear())],
        Json(ApiResponse::ok_empty("Logged out")),
    )
}

/// `GET /api/admin/product-requests`
pub async fn list_review_queue(
    State(state): State<AdminAppState>,
    RequireAdmin(_admin_id): RequireAdmin,
    Query(query): Query<ReviewQueueQuery>,
) -> ApiResult<Vec<ProductRequestView>> {
    let requests = ListProductRequestsHandler::new(state.product_requests.clone())
        .handle(ProductRequestFilter {
            status: query.status,
            vendor_id: query.vendor_id,
        })
        .await?;
    let views = requests.into_iter().map(Into::into).collect();
    Ok((StatusCode::OK, Json(ApiResponse::ok("OK", views))))
}

/// `GET /api/admin/product-requests/{id}`
pub async fn get_proposal(
    State(state): State<AdminAppState>,
    RequireAdmin(_admin_id): RequireAdmin,
    Path(request_id): Path<ProductRequestId>,
) -> ApiResult<ProductRequestView> {
    let request = GetProductRequestHandler::new(state.product_requests.clone())
        .handle(&request_id)
        .await?;
    Ok((StatusCode::OK, Json(ApiResponse::ok("OK", request.into()))))
}

async fn decide(
    state: AdminAppState,
    admin_id: crate::domain::foundation::AdminId,
    request_id: ProductRequestId,
    action: ReviewAction,
    comment: Option<String>,
) -> ApiResult<DecisionOutcomeView> {
    let result = state
        .review_handler()
        .handle(ReviewProductRequestCommand {
            request_id,
            action,
            comment,
            admin_id,
        })
        .await?;
    let message = match action {
        ReviewAction::Approve => "Proposal approved",
        ReviewAction::Reject => "Proposal rejected",
        ReviewAction::RequestChanges => "Changes requested",
    };
    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(
            message,
            DecisionOutcomeView {
                request: result.request.into(),
                created_product: result.created_product.map(Into::into),
            },
        )),
    ))
}

/// `POST /api/admin/product-requests/{id}/approve`
pub async fn approve_proposal(
    State(state): State<AdminAppState>,
    RequireAdmin(admin_id): RequireAdmin,
    Path(request_id): Path<ProductRequestId>,
    Json(body): Json<DecisionRequest>,
) -> ApiResult<DecisionOutcomeView> {
    decide(state, admin_id, request_id, ReviewAction::Approve, body.comment).await
}

/// `POST /api/admin/product-requests/{id}/reject`
pub async fn reject_proposal(
    State(state): State<AdminAppState>,
    RequireAdmin(admin_id): RequireAdmin,
    Path(request_id): Path<ProductRequestId>,
    Json(body): Json<DecisionRequest>,
) -> ApiResult<DecisionOutcomeView> {
    decide(state, admin_id, request_id, ReviewAction::Reject, body.comment).await
}

/// `POST /api/admin/product-requests/{id}/request-changes`
pub async fn request_changes(
    State(state): State<AdminAppState>,
    RequireAdmin(admin_id): RequireAdmin,
    Path(request_id): Path<ProductRequestId>,
    Json(body): Json<DecisionRequest>,
) -> ApiResult<DecisionOutcomeView> {
    decide(
        state,
        admin_id,
        request_id,
        ReviewAction::RequestChanges,
        body.comment,
    )
    .await
}

/// `POST /api/admin/stock-requests`
pub async fn create_stock_request(
    State(state): State<AdminAppState>,
    RequireAdmin(admin_id): RequireAdmin,
    Json(body): Json<CreateStockRequestBody>,
) -> ApiResult<StockRequestView> {
    let request = state
        .create_stock_request_handler()
        .handle(CreateStockRequestCommand {
            admin_id,
            product_id: body.product_id,
            quantity: body.quantity,
            note: body.note,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Stock request opened", request.into())),
    ))
}

/// `GET /api/admin/stock-requests`
pub async fn list_stock_requests(
    State(state): State<AdminAppState>,
    RequireAdmin(_admin_id): RequireAdmin,
    Query(query): Query<StockRequestQuery>,
) -> ApiResult<Vec<StockRequestView>> {
    let requests = ListStockRequestsHandler::new(state.stock_requests.clone())
        .handle(StockRequestFilter {
            status: query.status,
            vendor_id: query.vendor_id,
        })
        .await?;
    let views = requests.into_iter().map(Into::into).collect();
    Ok((StatusCode::OK, Json(ApiResponse::ok("OK", views))))
}

/// `POST /api/admin/stock-requests/{id}/cancel`
pub async fn cancel_stock_request(
    State(state): State<AdminAppState>,
    RequireAdmin(_admin_id): RequireAdmin,
    Path(request_id): Path<StockRequestId>,
) -> ApiResult<StockRequestView> {
    let request = CancelStockRequestHandler::new(state.stock_requests.clone())
        .handle(&request_id)
        .await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Stock request cancelled", request.into())),
    ))
}

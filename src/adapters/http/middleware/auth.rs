//! Session middleware and role extractors.
//!
//! The middleware reads the session token from the `ns_session` cookie
//! (Bearer header accepted as a fallback), validates it through the
//! [`TokenValidator`] port, and injects the [`AuthenticatedActor`] into
//! request extensions. Route handlers then use [`RequireVendor`] or
//! [`RequireAdmin`] to enforce the role and get a typed id.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::config::SESSION_COOKIE;
use crate::domain::foundation::{AdminId, VendorId};
use crate::ports::{AuthenticatedActor, Role, TokenValidator};

use super::super::response::ApiError;

/// Middleware state, just the validator port.
pub type AuthState = Arc<dyn TokenValidator>;

fn cookie_token<'a>(cookie_header: &'a str, cookie_name: &str) -> Option<&'a str> {
    cookie_header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == cookie_name).then_some(value)
    })
}

fn extract_token(request: &Request) -> Option<String> {
    let headers = request.headers();

    if let Some(token) = headers
        .get(header::COOKIE)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| cookie_token(h, SESSION_COOKIE))
    {
        return Some(token.to_string());
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_string)
}

/// Validates the session token and injects the actor.
///
/// Requests without a token pass through unauthenticated; the role
/// extractors reject them at the route. A token that is present but
/// invalid is a hard 401.
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    match extract_token(&request) {
        Some(token) => match validator.validate(&token) {
            Ok(actor) => {
                request.extensions_mut().insert(actor);
                next.run(request).await
            }
            Err(error) => ApiError::from(error).into_response(),
        },
        None => next.run(request).await,
    }
}

fn unauthenticated() -> ApiError {
    ApiError::new(StatusCode::UNAUTHORIZED, "Authentication required")
}

fn wrong_role() -> ApiError {
    ApiError::new(StatusCode::FORBIDDEN, "Insufficient permissions")
}

/// Extractor for routes that require a vendor session.
#[derive(Debug, Clone)]
pub struct RequireVendor(pub VendorId);

impl<S> axum::extract::FromRequestParts<S> for RequireVendor
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let actor = parts
                .extensions
                .get::<AuthenticatedActor>()
                .ok_or_else(unauthenticated)?;
            if actor.role != Role::Vendor {
                return Err(wrong_role());
            }
            let vendor_id = actor.id.parse::<VendorId>().map_err(|_| unauthenticated())?;
            Ok(RequireVendor(vendor_id))
        })
    }
}

/// Extractor for routes that require an admin session.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AdminId);

impl<S> axum::extract::FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let actor = parts
                .extensions
                .get::<AuthenticatedActor>()
                .ok_or_else(unauthenticated)?;
            if actor.role != Role::Admin {
                return Err(wrong_role());
            }
            let admin_id = actor.id.parse::<AdminId>().map_err(|_| unauthenticated())?;
            Ok(RequireAdmin(admin_id))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::FromRequestParts;
    use axum::http::Request;

    fn vendor_actor() -> AuthenticatedActor {
        AuthenticatedActor {
            id: VendorId::new().to_string(),
            role: Role::Vendor,
        }
    }

    fn admin_actor() -> AuthenticatedActor {
        AuthenticatedActor {
            id: AdminId::new().to_string(),
            role: Role::Admin,
        }
    }

    fn parts_with(actor: Option<AuthenticatedActor>) -> axum::http::request::Parts {
        let mut request: Request<()> = Request::builder().uri("/test").body(()).unwrap();
        if let Some(actor) = actor {
            request.extensions_mut().insert(actor);
        }
        request.into_parts().0
    }

    #[test]
    fn cookie_token_finds_the_session_cookie() {
        let header = "theme=dark; ns_session=abc.def.ghi; lang=en";
        assert_eq!(cookie_token(header, "ns_session"), Some("abc.def.ghi"));
    }

    #[test]
    fn cookie_token_ignores_prefix_matches() {
        let header = "ns_session_old=stale";
        assert_eq!(cookie_token(header, "ns_session"), None);
    }

    #[tokio::test]
    async fn require_vendor_accepts_vendor_actor() {
        let mut parts = parts_with(Some(vendor_actor()));
        let result = RequireVendor::from_request_parts(&mut parts, &()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn require_vendor_rejects_admin_actor() {
        let mut parts = parts_with(Some(admin_actor()));
        let result = RequireVendor::from_request_parts(&mut parts, &()).await;
        assert_eq!(result.unwrap_err().status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn require_vendor_rejects_anonymous_request() {
        let mut parts = parts_with(None);
        let result = RequireVendor::from_request_parts(&mut parts, &()).await;
        assert_eq!(result.unwrap_err().status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn require_admin_rejects_vendor_actor() {
        let mut parts = parts_with(Some(vendor_actor()));
        let result = RequireAdmin::from_request_parts(&mut parts, &()).await;
        assert_eq!(result.unwrap_err().status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn require_admin_accepts_admin_actor() {
        let mut parts = parts_with(Some(admin_actor()));
        let result = RequireAdmin::from_request_parts(&mut parts, &()).await;
        assert!(result.is_ok());
    }
}

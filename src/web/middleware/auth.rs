//! Authentication gateway middleware.
//!
//! Every protected request passes through the `AuthUser` extractor; no
//! handler implements its own token check. The session token is read from
//! the session cookie, falling back to an `Authorization: Bearer` header
//! for non-browser clients.

use axum::{
    body::Body,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, Request},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::auth::TokenService;
use crate::web::error::ApiError;

/// Shared state for the authentication gateway.
pub struct AuthGateway {
    /// Token service used to verify session tokens.
    pub tokens: TokenService,
    /// Name of the session cookie.
    pub cookie_name: String,
}

impl AuthGateway {
    /// Create a new gateway.
    pub fn new(tokens: TokenService, cookie_name: impl Into<String>) -> Self {
        Self {
            tokens,
            cookie_name: cookie_name.into(),
        }
    }
}

/// Extractor for authenticated users.
///
/// Handlers receive the verified user id; extraction short-circuits with
/// 401 before the handler runs when the token is missing or invalid.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub i64);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
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
            // Gateway state is injected by middleware
            let gateway = parts
                .extensions
                .get::<Arc<AuthGateway>>()
                .cloned()
                .ok_or_else(|| ApiError::internal("Auth gateway not configured"))?;

            // Session cookie first
            let jar = CookieJar::from_headers(&parts.headers);
            let token = if let Some(cookie) = jar.get(&gateway.cookie_name) {
                cookie.value().to_string()
            } else {
                // Fall back to a bearer header
                parts
                    .headers
                    .get(AUTHORIZATION)
                    .and_then(|value| value.to_str().ok())
                    .and_then(|header| header.strip_prefix("Bearer "))
                    .map(|t| t.to_string())
                    .ok_or_else(|| ApiError::unauthorized("Missing authorization"))?
            };

            let user_id = gateway
                .tokens
                .verify(&token)
                .map_err(|_| ApiError::unauthorized("Invalid or expired token"))?;

            Ok(AuthUser(user_id))
        })
    }
}

/// Middleware function to inject the auth gateway into request extensions.
pub async fn auth_context(
    gateway: Arc<AuthGateway>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    request.extensions_mut().insert(gateway);
    next.run(request).await
}

//! Router configuration for the Web API.

use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    delete_file, get_dashboard, list_documents, list_images, list_others, list_videos, login,
    logout, me, register, rename, upload, AppState,
};
use super::middleware::{
    api_rate_limit, auth_context, create_cors_layer, login_rate_limit, AuthGateway, RateLimitState,
};

/// Create the main API router.
pub fn create_router(
    app_state: Arc<AppState>,
    gateway: Arc<AuthGateway>,
    rate_limits: Arc<RateLimitState>,
    cors_origins: &[String],
) -> Router {
    // Login gets its own, stricter limiter on top of the general one
    let login_limiter = rate_limits.clone();
    let auth_routes = Router::new()
        .route("/register", post(register))
        .route(
            "/login",
            post(login).layer(middleware::from_fn(move |req, next| {
                login_rate_limit(login_limiter.clone(), req, next)
            })),
        )
        .route("/logout", post(logout))
        .route("/get", get(me));

    let file_routes = Router::new()
        .route("/upload", post(upload))
        .route("/images", get(list_images))
        .route("/document", get(list_documents))
        .route("/other", get(list_others))
        .route("/videos", get(list_videos))
        .route("/:id/rename", patch(rename))
        .route("/:id", delete(delete_file));

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/files", file_routes)
        .route("/dashboard", get(get_dashboard));

    let api_limiter = rate_limits.clone();

    Router::new()
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(move |req, next| {
                    api_rate_limit(api_limiter.clone(), req, next)
                }))
                .layer(middleware::from_fn(move |req, next| {
                    auth_context(gateway.clone(), req, next)
                })),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_health_router() {
        let _router = create_health_router();
        // Should not panic
    }
}

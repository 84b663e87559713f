//! Rate limiting middleware.
//!
//! Per-client-address limiters bound load at the gateway boundary; the only
//! backpressure is rejection with 429.

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::{
    collections::HashMap,
    net::SocketAddr,
    num::NonZeroU32,
    sync::{Arc, RwLock},
    time::Duration,
};

/// Per-address rate limiter using Governor.
pub type AddressRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Limiter scope: login attempts are throttled harder than general API
/// traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Login endpoint.
    Login,
    /// General API.
    Api,
}

/// State for rate limiting.
#[derive(Clone)]
pub struct RateLimitState {
    limiters: Arc<RwLock<HashMap<(Scope, String), Arc<AddressRateLimiter>>>>,
    login_per_minute: u32,
    api_per_minute: u32,
}

impl RateLimitState {
    /// Create a new rate limit state.
    pub fn new(login_per_minute: u32, api_per_minute: u32) -> Self {
        Self {
            limiters: Arc::new(RwLock::new(HashMap::new())),
            login_per_minute,
            api_per_minute,
        }
    }

    fn quota_for(&self, scope: Scope) -> u32 {
        match scope {
            Scope::Login => self.login_per_minute,
            Scope::Api => self.api_per_minute,
        }
    }

    /// Check if a request from `addr` is allowed in the given scope.
    pub fn check(&self, scope: Scope, addr: &str) -> bool {
        let key = (scope, addr.to_string());

        // Fast path under the read lock
        {
            let read_guard = self.limiters.read().unwrap();
            if let Some(limiter) = read_guard.get(&key) {
                return limiter.check().is_ok();
            }
        }

        let mut write_guard = self.limiters.write().unwrap();
        // Double-check after acquiring the write lock
        if let Some(limiter) = write_guard.get(&key) {
            return limiter.check().is_ok();
        }

        let per_minute =
            NonZeroU32::new(self.quota_for(scope)).unwrap_or(NonZeroU32::MIN);
        let limiter = Arc::new(RateLimiter::direct(Quota::per_minute(per_minute)));
        let allowed = limiter.check().is_ok();
        write_guard.insert(key, limiter);
        allowed
    }

    /// Drop limiters nothing else holds a reference to.
    pub fn cleanup(&self) {
        let mut guard = self.limiters.write().unwrap();
        guard.retain(|_, v| Arc::strong_count(v) > 1);
    }

    /// Start a background task to periodically clean up old entries.
    pub fn start_cleanup_task(self: Arc<Self>) {
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(Duration::from_secs(300)).await;
                self.cleanup();
            }
        });
    }
}

/// Extract the client address from a request.
fn client_address(req: &Request<Body>) -> String {
    // X-Forwarded-For first (reverse proxy); take the first hop
    if let Some(forwarded) = req
        .headers()
        .get("X-Forwarded-For")
        .and_then(|v| v.to_str().ok())
    {
        if let Some(addr) = forwarded.split(',').next() {
            return addr.trim().to_string();
        }
    }

    if let Some(ConnectInfo(addr)) = req.extensions().get::<ConnectInfo<SocketAddr>>() {
        return addr.ip().to_string();
    }

    "unknown".to_string()
}

/// Rate limiting middleware for the login endpoint.
pub async fn login_rate_limit(
    state: Arc<RateLimitState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let addr = client_address(&req);

    if !state.check(Scope::Login, &addr) {
        tracing::warn!(addr = %addr, "login rate limit exceeded");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            "Too many login attempts. Please try again later.",
        )
            .into_response();
    }

    next.run(req).await
}

/// Rate limiting middleware for the general API.
pub async fn api_rate_limit(
    state: Arc<RateLimitState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let addr = client_address(&req);

    if !state.check(Scope::Api, &addr) {
        tracing::warn!(addr = %addr, "API rate limit exceeded");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            "Too many requests. Please try again later.",
        )
            .into_response();
    }

    next.run(req).await
}

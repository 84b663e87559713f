//! Web server for Cirrus.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;

use crate::auth::TokenService;
use crate::config::Config;
use crate::dashboard::DashboardService;
use crate::db::Database;
use crate::file::{BlobStore, FileService};
use crate::{CirrusError, Result};

use super::handlers::AppState;
use super::middleware::{AuthGateway, RateLimitState};
use super::router::{create_health_router, create_router};

/// Web server for the API.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Assembled router.
    router: axum::Router,
}

impl WebServer {
    /// Create a new web server.
    ///
    /// Wires every component from the loaded configuration; nothing below
    /// this point reads config on its own.
    pub fn new(config: &Config, db: Database, storage: Arc<dyn BlobStore>) -> Result<Self> {
        let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| CirrusError::Config(format!("invalid server address: {e}")))?;

        let tokens = TokenService::new(&config.auth.jwt_secret, config.auth.token_expiry_days);

        let app_state = Arc::new(AppState {
            db: db.clone(),
            tokens: tokens.clone(),
            files: FileService::new(db.clone(), storage),
            dashboard: DashboardService::new(db, config.quota.total_storage_gb),
            cookie_name: config.auth.cookie_name.clone(),
        });

        let gateway = Arc::new(AuthGateway::new(tokens, config.auth.cookie_name.clone()));

        let rate_limits = Arc::new(RateLimitState::new(
            config.rate_limits.login_per_minute,
            config.rate_limits.api_per_minute,
        ));
        rate_limits.clone().start_cleanup_task();

        let router = create_router(app_state, gateway, rate_limits, &config.server.cors_origins)
            .merge(create_health_router())
            .layer(CompressionLayer::new());

        Ok(Self { addr, router })
    }

    /// Get the configured server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Run the web server.
    pub async fn run(self) -> std::io::Result<()> {
        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Web server listening on http://{}", local_addr);

        axum::serve(
            listener,
            self.router
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
    }

    /// Run the server and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> std::io::Result<SocketAddr> {
        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(
                listener,
                self.router
                    .into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}

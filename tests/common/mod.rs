//! Test helpers for Web API integration tests.
//!
//! Builds the full router against an in-memory database and blob store.

#![allow(dead_code)]

use std::sync::Arc;

use axum::async_trait;
use axum_test::TestServer;
use serde_json::{json, Value};

use cirrus::web::handlers::AppState;
use cirrus::web::middleware::{AuthGateway, RateLimitState};
use cirrus::web::router::{create_health_router, create_router};
use cirrus::{
    BlobStore, CirrusError, DashboardService, Database, FileService, MemoryBlobStore, Result,
    StoredObject, TokenService,
};

/// Signing secret used by all test servers.
pub const TEST_JWT_SECRET: &str = "test-secret-key-for-testing-only";

/// Storage quota used by all test servers, in GiB.
pub const TEST_QUOTA_GB: u64 = 10;

/// A running test server plus handles into its backing stores.
pub struct TestContext {
    pub server: TestServer,
    pub db: Database,
    pub storage: Arc<MemoryBlobStore>,
}

/// Blob store double whose uploads always fail.
pub struct FailingBlobStore;

#[async_trait]
impl BlobStore for FailingBlobStore {
    async fn put(&self, _: &[u8], _: &str, _: &str) -> Result<StoredObject> {
        Err(CirrusError::Storage("blob store unavailable".to_string()))
    }

    async fn remove(&self, _: &str) -> Result<()> {
        Err(CirrusError::Storage("blob store unavailable".to_string()))
    }
}

/// Build a test server around the given blob store.
pub async fn create_test_server_with_storage(storage: Arc<dyn BlobStore>) -> (TestServer, Database) {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");

    let tokens = TokenService::new(TEST_JWT_SECRET, 7);

    let app_state = Arc::new(AppState {
        db: db.clone(),
        tokens: tokens.clone(),
        files: FileService::new(db.clone(), storage),
        dashboard: DashboardService::new(db.clone(), TEST_QUOTA_GB),
        cookie_name: "token".to_string(),
    });

    let gateway = Arc::new(AuthGateway::new(tokens, "token"));

    // Generous limits so throttling never interferes with tests
    let rate_limits = Arc::new(RateLimitState::new(1000, 10000));

    let router =
        create_router(app_state, gateway, rate_limits, &[]).merge(create_health_router());

    let mut server = TestServer::new(router).expect("Failed to create test server");
    server.save_cookies();

    (server, db)
}

/// Build a test server with an in-memory blob store.
pub async fn create_test_server() -> TestContext {
    let storage = Arc::new(MemoryBlobStore::new());
    let (server, db) = create_test_server_with_storage(storage.clone()).await;

    TestContext {
        server,
        db,
        storage,
    }
}

/// Register a user and return the response body.
pub async fn register_user(server: &TestServer, name: &str, email: &str, password: &str) -> Value {
    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "name": name,
            "email": email,
            "password": password
        }))
        .await;

    response.json::<Value>()
}

/// Log a user in and return the session token from the response body.
///
/// The session cookie is also captured by the server's cookie jar.
pub async fn login_user(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .post("/api/auth/login")
        .json(&json!({
            "email": email,
            "password": password
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    body["data"]["token"]
        .as_str()
        .expect("login response carries a token")
        .to_string()
}

/// Register and log in, returning the session token.
pub async fn register_and_login(
    server: &TestServer,
    name: &str,
    email: &str,
    password: &str,
) -> String {
    register_user(server, name, email, password).await;
    login_user(server, email, password).await
}

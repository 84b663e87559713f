//! API handlers for the Web API.

pub mod auth;
pub mod dashboard;
pub mod file;

pub use auth::*;
pub use dashboard::*;
pub use file::*;

use crate::auth::TokenService;
use crate::dashboard::DashboardService;
use crate::db::Database;
use crate::file::FileService;

/// Application state shared across handlers.
///
/// Constructed once at startup from the loaded configuration; handlers and
/// services never read ambient global state.
#[derive(Clone)]
pub struct AppState {
    /// Database handle.
    pub db: Database,
    /// Token service for issuing session tokens.
    pub tokens: TokenService,
    /// File service.
    pub files: FileService,
    /// Dashboard aggregator.
    pub dashboard: DashboardService,
    /// Name of the session cookie.
    pub cookie_name: String,
}

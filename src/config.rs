//! Configuration module for Cirrus.
//!
//! The configuration is loaded once at startup and passed by reference into
//! each component. Business logic never reads ambient global state.

use serde::Deserialize;
use std::path::Path;

use crate::{CirrusError, Result};

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allowed CORS origins (empty = allow any).
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/cirrus.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Authentication configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Secret used to sign session tokens. Must be set; startup fails
    /// without it.
    #[serde(default)]
    pub jwt_secret: String,
    /// Session token lifetime in days.
    #[serde(default = "default_token_expiry_days")]
    pub token_expiry_days: u64,
    /// Name of the session cookie.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
}

fn default_token_expiry_days() -> u64 {
    7
}

fn default_cookie_name() -> String {
    "token".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_expiry_days: default_token_expiry_days(),
            cookie_name: default_cookie_name(),
        }
    }
}

/// Blob store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Base URL of the object-storage service. When unset, an in-memory
    /// store is used (local development only - contents are lost on
    /// restart).
    #[serde(default)]
    pub endpoint: Option<String>,
    /// API key for the object-storage service.
    #[serde(default)]
    pub api_key: String,
    /// Folder (key prefix) objects are uploaded under.
    #[serde(default = "default_storage_folder")]
    pub folder: String,
}

fn default_storage_folder() -> String {
    "cirrus".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: String::new(),
            folder: default_storage_folder(),
        }
    }
}

/// Storage quota configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct QuotaConfig {
    /// Per-user storage ceiling in GiB, used for usage-percentage display.
    /// Not enforced against uploads.
    #[serde(default = "default_total_storage_gb")]
    pub total_storage_gb: u64,
}

fn default_total_storage_gb() -> u64 {
    10
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            total_storage_gb: default_total_storage_gb(),
        }
    }
}

/// Rate limit configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Login attempts per minute per client address.
    #[serde(default = "default_login_rate_limit")]
    pub login_per_minute: u32,
    /// General API requests per minute per client address.
    #[serde(default = "default_api_rate_limit")]
    pub api_per_minute: u32,
}

fn default_login_rate_limit() -> u32 {
    5
}

fn default_api_rate_limit() -> u32 {
    100
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            login_per_minute: default_login_rate_limit(),
            api_per_minute: default_api_rate_limit(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace / debug / info / warn / error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file path (empty = console only).
    #[serde(default)]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: String::new(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Blob store settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Quota settings.
    #[serde(default)]
    pub quota: QuotaConfig,
    /// Rate limit settings.
    #[serde(default)]
    pub rate_limits: RateLimitConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// The process cannot serve requests without a signing secret, so an
    /// absent or empty `auth.jwt_secret` is a hard error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| CirrusError::Config(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate invariants that cannot be expressed through serde defaults.
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(CirrusError::Config(
                "auth.jwt_secret must be set".to_string(),
            ));
        }
        if self.quota.total_storage_gb == 0 {
            return Err(CirrusError::Config(
                "quota.total_storage_gb must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

//! Cirrus - Personal cloud storage backend
//!
//! A REST API for registering users, uploading files to an external blob
//! store, browsing files by category, and viewing storage-usage statistics.

pub mod auth;
pub mod config;
pub mod dashboard;
pub mod datetime;
pub mod db;
pub mod error;
pub mod file;
pub mod logging;
pub mod web;

pub use auth::{hash_password, validate_password, verify_password, TokenService};
pub use config::Config;
pub use dashboard::{DashboardService, DashboardView};
pub use db::{Database, NewUser, User, UserRepository};
pub use error::{CirrusError, Result};
pub use file::{
    BlobStore, FileCategory, FileRecord, FileRepository, FileService, HttpBlobStore,
    MemoryBlobStore, NewFile, StoredObject,
};
pub use web::WebServer;

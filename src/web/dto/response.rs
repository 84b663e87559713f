//! Response DTOs for the Web API.
//!
//! Response types never carry the password hash; `UserInfo` is the only
//! projection of a user record that leaves the server.

use serde::Serialize;

use crate::db::User;
use crate::file::FileRecord;

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// User information in responses.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    /// User ID.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// Login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Session token; also delivered as an HTTP-only cookie.
    pub token: String,
    /// Authenticated user.
    pub user: UserInfo,
}

/// Full file metadata in responses.
#[derive(Debug, Serialize)]
pub struct FileResponse {
    /// File ID.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Blob-store URL.
    pub url: String,
    /// Size in bytes.
    pub size: i64,
    /// Category.
    pub category: String,
    /// Creation timestamp.
    pub date: String,
}

impl From<FileRecord> for FileResponse {
    fn from(record: FileRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            url: record.url,
            size: record.size,
            category: record.category,
            date: record.created_at,
        }
    }
}

/// Compact file entry for category listings.
#[derive(Debug, Serialize)]
pub struct FileSummary {
    /// File ID.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Blob-store URL.
    pub url: String,
    /// Size in bytes.
    pub size: i64,
    /// Creation timestamp.
    pub date: String,
}

impl From<FileRecord> for FileSummary {
    fn from(record: FileRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            url: record.url,
            size: record.size,
            date: record.created_at,
        }
    }
}

//! Request DTOs for the Web API.

use serde::{Deserialize, Deserializer};
use validator::Validate;

use crate::file::DEFAULT_PAGE_SIZE;

/// User registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Email address.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Plaintext password; hashed before it reaches the store.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
}

/// File rename request.
#[derive(Debug, Deserialize)]
pub struct RenameRequest {
    /// New display name.
    #[serde(rename = "newName")]
    pub new_name: String,
}

/// Pagination query for file listings.
///
/// Non-numeric values are treated as absent rather than rejected, so
/// `?page=abc` falls back to the defaults.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// 1-based page number.
    #[serde(default, deserialize_with = "lenient_number")]
    pub page: Option<u32>,
    /// Page size.
    #[serde(default, deserialize_with = "lenient_number")]
    pub limit: Option<u32>,
}

impl ListQuery {
    /// Effective page (default 1).
    pub fn page(&self) -> u32 {
        self.page.filter(|p| *p >= 1).unwrap_or(1)
    }

    /// Effective page size (default 10).
    pub fn limit(&self) -> u32 {
        self.limit.filter(|l| *l >= 1).unwrap_or(DEFAULT_PAGE_SIZE)
    }
}

/// Deserialize a query value as a number, mapping parse failures to None.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.parse().ok()))
}

//! User model for Cirrus.

use sqlx::FromRow;

/// User entity representing a registered account.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Email address (unique, case-insensitive).
    pub email: String,
    /// Password hash (Argon2id PHC string).
    pub password: String,
    /// Cumulative storage counter. Kept for schema compatibility; the
    /// dashboard computes usage from the file registry instead.
    pub total_storage_used: i64,
    /// Account creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Password hash (must be pre-hashed with Argon2id).
    pub password: String,
}

impl NewUser {
    /// Create a new user record. `password` is the hash, never plaintext.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

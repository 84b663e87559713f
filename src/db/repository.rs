//! User repository for Cirrus.
//!
//! CRUD operations for the credential store.

use sqlx::SqlitePool;

use super::user::{NewUser, User};
use crate::{datetime, CirrusError, Result};

/// Repository for user records.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user.
    ///
    /// The email uniqueness invariant is enforced by the store: a collision
    /// on the unique index is reported as `CirrusError::Duplicate`.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let now = datetime::now();
        let result = sqlx::query(
            "INSERT INTO users (name, email, password, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.password)
        .bind(&now)
        .bind(&now)
        .execute(self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                CirrusError::Duplicate("email already registered".to_string())
            }
            _ => CirrusError::Database(e.to_string()),
        })?;

        let id = result.last_insert_rowid();
        self.find_by_id(id)
            .await?
            .ok_or_else(|| CirrusError::NotFound("user".to_string()))
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let result = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password, total_storage_used, created_at, updated_at
             FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(result)
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let result = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password, total_storage_used, created_at, updated_at
             FROM users WHERE email = ? COLLATE NOCASE",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    async fn test_db() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn test_create_and_find_by_id() {
        let db = test_db().await;
        let repo = UserRepository::new(db.pool());

        let user = repo
            .create(&NewUser::new("Alice", "alice@example.com", "$hash"))
            .await
            .unwrap();
        assert_eq!(user.name, "Alice");
        assert_eq!(user.total_storage_used, 0);

        let found = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(found.email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_find_by_email_case_insensitive() {
        let db = test_db().await;
        let repo = UserRepository::new(db.pool());

        repo.create(&NewUser::new("Bob", "Bob@Example.com", "$hash"))
            .await
            .unwrap();

        let found = repo.find_by_email("bob@example.com").await.unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().name, "Bob");
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let db = test_db().await;
        let repo = UserRepository::new(db.pool());

        repo.create(&NewUser::new("First", "dup@example.com", "$h1"))
            .await
            .unwrap();

        let result = repo
            .create(&NewUser::new("Second", "dup@example.com", "$h2"))
            .await;
        assert!(matches!(result, Err(CirrusError::Duplicate(_))));
    }

    #[tokio::test]
    async fn test_duplicate_email_differs_only_in_case() {
        let db = test_db().await;
        let repo = UserRepository::new(db.pool());

        repo.create(&NewUser::new("First", "case@example.com", "$h1"))
            .await
            .unwrap();

        let result = repo
            .create(&NewUser::new("Second", "CASE@EXAMPLE.COM", "$h2"))
            .await;
        assert!(matches!(result, Err(CirrusError::Duplicate(_))));
    }

    #[tokio::test]
    async fn test_find_missing_user() {
        let db = test_db().await;
        let repo = UserRepository::new(db.pool());

        assert!(repo.find_by_id(999).await.unwrap().is_none());
        assert!(repo
            .find_by_email("nobody@example.com")
            .await
            .unwrap()
            .is_none());
    }
}

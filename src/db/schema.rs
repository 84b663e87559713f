//! Database schema migrations for Cirrus.
//!
//! Each entry is applied in order inside a transaction and recorded in the
//! `schema_version` table.

/// Ordered list of schema migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: users and files
    "CREATE TABLE users (
        id                  INTEGER PRIMARY KEY AUTOINCREMENT,
        name                TEXT NOT NULL,
        email               TEXT NOT NULL COLLATE NOCASE,
        password            TEXT NOT NULL,
        total_storage_used  INTEGER NOT NULL DEFAULT 0,
        created_at          TEXT NOT NULL,
        updated_at          TEXT NOT NULL
    );
    CREATE UNIQUE INDEX idx_users_email_nocase ON users (email COLLATE NOCASE);

    CREATE TABLE files (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        owner_id    INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        name        TEXT NOT NULL,
        url         TEXT NOT NULL,
        object_id   TEXT NOT NULL,
        size        INTEGER NOT NULL,
        category    TEXT NOT NULL,
        created_at  TEXT NOT NULL,
        updated_at  TEXT NOT NULL
    );
    CREATE INDEX idx_files_owner_category_created
        ON files (owner_id, category, created_at);",
];

//! File metadata for Cirrus.
//!
//! The file registry is the system's source of truth: a file exists exactly
//! when its metadata record does, regardless of blob-store state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

use crate::{datetime, CirrusError, Result};

/// File category, derived once from the declared content type at upload
/// time and stored denormalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileCategory {
    /// PDF, word-processor, and spreadsheet documents.
    Document,
    /// Raster and vector images.
    Image,
    /// Video and audio media.
    VideoOrAudio,
    /// Everything else.
    Other,
}

impl FileCategory {
    /// Database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            FileCategory::Document => "document",
            FileCategory::Image => "image",
            FileCategory::VideoOrAudio => "video-or-audio",
            FileCategory::Other => "other",
        }
    }

    /// Classify a declared content type.
    ///
    /// Pure function; the result is stored on the record and never
    /// recomputed later.
    pub fn from_content_type(content_type: &str) -> Self {
        let mime = content_type.to_ascii_lowercase();
        if mime.starts_with("image/") {
            FileCategory::Image
        } else if mime.starts_with("video/") || mime.starts_with("audio/") {
            FileCategory::VideoOrAudio
        } else if mime.contains("pdf") || mime.contains("word") || mime.contains("excel") {
            FileCategory::Document
        } else {
            FileCategory::Other
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FileCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "document" => Ok(FileCategory::Document),
            "image" => Ok(FileCategory::Image),
            "video-or-audio" => Ok(FileCategory::VideoOrAudio),
            "other" => Ok(FileCategory::Other),
            _ => Err(format!("unknown category: {s}")),
        }
    }
}

/// File metadata record.
#[derive(Debug, Clone, FromRow)]
pub struct FileRecord {
    /// Unique file ID.
    pub id: i64,
    /// Owning user. Immutable after creation.
    pub owner_id: i64,
    /// Display name (mutable via rename).
    pub name: String,
    /// Durable blob-store URL.
    pub url: String,
    /// Opaque blob-store object identifier.
    pub object_id: String,
    /// Size in bytes, authoritative from the blob store.
    pub size: i64,
    /// Stored category string.
    pub category: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

/// Data for creating a new file record.
#[derive(Debug, Clone)]
pub struct NewFile {
    /// Owning user.
    pub owner_id: i64,
    /// Display name (the original upload filename).
    pub name: String,
    /// Blob-store URL.
    pub url: String,
    /// Blob-store object identifier.
    pub object_id: String,
    /// Size in bytes.
    pub size: i64,
    /// Derived category.
    pub category: FileCategory,
}

/// Per-category aggregate used by the dashboard.
#[derive(Debug, Clone, FromRow)]
pub struct CategoryAggregate {
    /// Stored category string.
    pub category: String,
    /// Number of files in the category.
    pub file_count: i64,
    /// Creation timestamp of the most recent upload.
    pub latest_upload: Option<String>,
}

/// Repository for file records.
pub struct FileRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> FileRepository<'a> {
    /// Create a new FileRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new file record.
    pub async fn create(&self, new_file: &NewFile) -> Result<FileRecord> {
        let now = datetime::now();
        let result = sqlx::query(
            "INSERT INTO files (owner_id, name, url, object_id, size, category, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(new_file.owner_id)
        .bind(&new_file.name)
        .bind(&new_file.url)
        .bind(&new_file.object_id)
        .bind(new_file.size)
        .bind(new_file.category.as_str())
        .bind(&now)
        .bind(&now)
        .execute(self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.find_by_id(id)
            .await?
            .ok_or_else(|| CirrusError::NotFound("file".to_string()))
    }

    /// Find a file by ID.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<FileRecord>> {
        let result = sqlx::query_as::<_, FileRecord>(
            "SELECT id, owner_id, name, url, object_id, size, category, created_at, updated_at
             FROM files WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(result)
    }

    /// Find a file by ID, scoped to its owner.
    ///
    /// Returns None both for unknown ids and for files owned by someone
    /// else, so callers cannot distinguish the two.
    pub async fn find_owned(&self, id: i64, owner_id: i64) -> Result<Option<FileRecord>> {
        let result = sqlx::query_as::<_, FileRecord>(
            "SELECT id, owner_id, name, url, object_id, size, category, created_at, updated_at
             FROM files WHERE id = ? AND owner_id = ?",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(result)
    }

    /// List an owner's files in one category, newest first.
    pub async fn list_by_category(
        &self,
        owner_id: i64,
        category: FileCategory,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<FileRecord>> {
        let result = sqlx::query_as::<_, FileRecord>(
            "SELECT id, owner_id, name, url, object_id, size, category, created_at, updated_at
             FROM files
             WHERE owner_id = ? AND category = ?
             ORDER BY created_at DESC, id DESC
             LIMIT ? OFFSET ?",
        )
        .bind(owner_id)
        .bind(category.as_str())
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        Ok(result)
    }

    /// Rename a file. Returns the updated record, or None if the id is
    /// unknown.
    pub async fn rename(&self, id: i64, new_name: &str) -> Result<Option<FileRecord>> {
        let now = datetime::now();
        let result = sqlx::query("UPDATE files SET name = ?, updated_at = ? WHERE id = ?")
            .bind(new_name)
            .bind(&now)
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    /// Delete a file record. Returns true when a row was removed.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM files WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Total bytes stored by an owner.
    pub async fn total_size(&self, owner_id: i64) -> Result<i64> {
        let total: i64 =
            sqlx::query_scalar("SELECT COALESCE(SUM(size), 0) FROM files WHERE owner_id = ?")
                .bind(owner_id)
                .fetch_one(self.pool)
                .await?;

        Ok(total)
    }

    /// Per-category file counts and latest upload timestamps for an owner.
    pub async fn category_aggregates(&self, owner_id: i64) -> Result<Vec<CategoryAggregate>> {
        let result = sqlx::query_as::<_, CategoryAggregate>(
            "SELECT category, COUNT(*) AS file_count, MAX(created_at) AS latest_upload
             FROM files WHERE owner_id = ?
             GROUP BY category",
        )
        .bind(owner_id)
        .fetch_all(self.pool)
        .await?;

        Ok(result)
    }

    /// An owner's most recently created files.
    pub async fn recent(&self, owner_id: i64, limit: u32) -> Result<Vec<FileRecord>> {
        let result = sqlx::query_as::<_, FileRecord>(
            "SELECT id, owner_id, name, url, object_id, size, category, created_at, updated_at
             FROM files WHERE owner_id = ?
             ORDER BY created_at DESC, id DESC
             LIMIT ?",
        )
        .bind(owner_id)
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(result)
    }
}

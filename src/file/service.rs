//! File service for Cirrus.
//!
//! High-level file operations: upload orchestration, listing by category,
//! rename, and delete. Ownership is enforced here; handlers only supply the
//! authenticated user id.

use std::sync::Arc;

use crate::db::Database;
use crate::{CirrusError, Result};

use super::metadata::{FileCategory, FileRecord, FileRepository, NewFile};
use super::storage::BlobStore;

/// Default page size for listings.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// File service for managing uploads and the file registry.
#[derive(Clone)]
pub struct FileService {
    db: Database,
    storage: Arc<dyn BlobStore>,
}

impl FileService {
    /// Create a new FileService.
    pub fn new(db: Database, storage: Arc<dyn BlobStore>) -> Self {
        Self { db, storage }
    }

    /// Upload a file.
    ///
    /// The blob store is awaited first; the registry record is created only
    /// after the store confirms persistence, stamped with the returned URL,
    /// object id, and confirmed byte size. A store failure therefore leaves
    /// no metadata behind.
    pub async fn upload(
        &self,
        owner_id: i64,
        content: &[u8],
        original_name: &str,
        content_type: &str,
    ) -> Result<FileRecord> {
        if content.is_empty() {
            return Err(CirrusError::Validation("no file provided".to_string()));
        }

        let category = FileCategory::from_content_type(content_type);

        let stored = self
            .storage
            .put(content, original_name, content_type)
            .await?;

        let new_file = NewFile {
            owner_id,
            name: original_name.to_string(),
            url: stored.url,
            object_id: stored.object_id,
            size: stored.size,
            category,
        };

        let record = FileRepository::new(self.db.pool()).create(&new_file).await?;

        tracing::info!(
            file_id = record.id,
            owner_id,
            size = record.size,
            category = %category,
            "file uploaded"
        );

        Ok(record)
    }

    /// List an owner's files in one category, newest first.
    ///
    /// `page` is 1-based; out-of-range values are clamped.
    pub async fn list(
        &self,
        owner_id: i64,
        category: FileCategory,
        page: u32,
        limit: u32,
    ) -> Result<Vec<FileRecord>> {
        let page = page.max(1);
        let limit = if limit == 0 { DEFAULT_PAGE_SIZE } else { limit };
        let offset = (page - 1).saturating_mul(limit);

        FileRepository::new(self.db.pool())
            .list_by_category(owner_id, category, limit, offset)
            .await
    }

    /// Rename a file owned by `owner_id`.
    ///
    /// Foreign and unknown file ids both answer `NotFound`.
    pub async fn rename(&self, owner_id: i64, file_id: i64, new_name: &str) -> Result<FileRecord> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(CirrusError::Validation(
                "name must not be empty".to_string(),
            ));
        }

        let repo = FileRepository::new(self.db.pool());
        repo.find_owned(file_id, owner_id)
            .await?
            .ok_or_else(|| CirrusError::NotFound("file".to_string()))?;

        repo.rename(file_id, new_name)
            .await?
            .ok_or_else(|| CirrusError::NotFound("file".to_string()))
    }

    /// Delete a file owned by `owner_id`.
    ///
    /// Metadata deletion is the source of truth; the blob-store object is
    /// purged afterwards best-effort, and a purge failure only logs a
    /// warning.
    pub async fn delete(&self, owner_id: i64, file_id: i64) -> Result<()> {
        let repo = FileRepository::new(self.db.pool());
        let record = repo
            .find_owned(file_id, owner_id)
            .await?
            .ok_or_else(|| CirrusError::NotFound("file".to_string()))?;

        if !repo.delete(file_id).await? {
            return Err(CirrusError::NotFound("file".to_string()));
        }

        if let Err(e) = self.storage.remove(&record.object_id).await {
            tracing::warn!(
                file_id,
                object_id = %record.object_id,
                error = %e,
                "failed to purge blob-store object; storage leaked"
            );
        }

        tracing::info!(file_id, owner_id, "file deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{NewUser, UserRepository};
    use crate::file::storage::{MemoryBlobStore, StoredObject};
    use axum::async_trait;

    /// Blob store double whose put always fails.
    struct BrokenBlobStore;

    #[async_trait]
    impl BlobStore for BrokenBlobStore {
        async fn put(&self, _: &[u8], _: &str, _: &str) -> Result<StoredObject> {
            Err(CirrusError::Storage("service unavailable".to_string()))
        }

        async fn remove(&self, _: &str) -> Result<()> {
            Err(CirrusError::Storage("service unavailable".to_string()))
        }
    }

    async fn setup() -> (Database, Arc<MemoryBlobStore>, FileService, i64) {
        let db = Database::open_in_memory().await.unwrap();
        let storage = Arc::new(MemoryBlobStore::new());
        let service = FileService::new(db.clone(), storage.clone());
        let user = UserRepository::new(db.pool())
            .create(&NewUser::new("Owner", "owner@example.com", "$hash"))
            .await
            .unwrap();
        (db, storage, service, user.id)
    }

    #[tokio::test]
    async fn test_upload_creates_record_and_blob() {
        let (_db, storage, service, owner_id) = setup().await;

        let record = service
            .upload(owner_id, b"png bytes", "photo.png", "image/png")
            .await
            .unwrap();

        assert_eq!(record.owner_id, owner_id);
        assert_eq!(record.category, "image");
        assert_eq!(record.size, 9);
        assert!(storage.contains(&record.object_id));
    }

    #[tokio::test]
    async fn test_upload_rejects_empty_content() {
        let (_db, storage, service, owner_id) = setup().await;

        let result = service
            .upload(owner_id, b"", "empty.txt", "text/plain")
            .await;
        assert!(matches!(result, Err(CirrusError::Validation(_))));
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_upload_failure_leaves_no_metadata() {
        let (db, _storage, _service, owner_id) = setup().await;
        let broken = FileService::new(db.clone(), Arc::new(BrokenBlobStore));

        let result = broken
            .upload(owner_id, b"bytes", "doomed.txt", "text/plain")
            .await;
        assert!(matches!(result, Err(CirrusError::Storage(_))));

        let files = FileRepository::new(db.pool())
            .recent(owner_id, 10)
            .await
            .unwrap();
        assert!(files.is_empty());
    }

    #[tokio::test]
    async fn test_list_scoped_to_owner() {
        let (db, _storage, service, owner_id) = setup().await;
        let other = UserRepository::new(db.pool())
            .create(&NewUser::new("Other", "other@example.com", "$hash"))
            .await
            .unwrap();

        service
            .upload(owner_id, b"a", "a.png", "image/png")
            .await
            .unwrap();
        service
            .upload(other.id, b"b", "b.png", "image/png")
            .await
            .unwrap();

        let mine = service
            .list(owner_id, FileCategory::Image, 1, 10)
            .await
            .unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].name, "a.png");
    }

    #[tokio::test]
    async fn test_list_clamps_page_and_limit() {
        let (_db, _storage, service, owner_id) = setup().await;

        service
            .upload(owner_id, b"a", "a.png", "image/png")
            .await
            .unwrap();

        // Page 0 behaves as page 1; limit 0 falls back to the default
        let listed = service
            .list(owner_id, FileCategory::Image, 0, 0)
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn test_rename() {
        let (_db, _storage, service, owner_id) = setup().await;

        let record = service
            .upload(owner_id, b"x", "old.txt", "text/plain")
            .await
            .unwrap();

        let renamed = service
            .rename(owner_id, record.id, "  new.txt  ")
            .await
            .unwrap();
        assert_eq!(renamed.name, "new.txt");
    }

    #[tokio::test]
    async fn test_rename_empty_name_rejected_without_mutation() {
        let (db, _storage, service, owner_id) = setup().await;

        let record = service
            .upload(owner_id, b"x", "keep.txt", "text/plain")
            .await
            .unwrap();

        let result = service.rename(owner_id, record.id, "   ").await;
        assert!(matches!(result, Err(CirrusError::Validation(_))));

        let unchanged = FileRepository::new(db.pool())
            .find_by_id(record.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(unchanged.name, "keep.txt");
    }

    #[tokio::test]
    async fn test_rename_unknown_id() {
        let (_db, _storage, service, owner_id) = setup().await;
        let result = service.rename(owner_id, 9999, "name").await;
        assert!(matches!(result, Err(CirrusError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_rename_foreign_file_not_found() {
        let (db, _storage, service, owner_id) = setup().await;
        let other = UserRepository::new(db.pool())
            .create(&NewUser::new("Other", "other@example.com", "$hash"))
            .await
            .unwrap();

        let record = service
            .upload(other.id, b"x", "theirs.txt", "text/plain")
            .await
            .unwrap();

        let result = service.rename(owner_id, record.id, "stolen.txt").await;
        assert!(matches!(result, Err(CirrusError::NotFound(_))));

        let unchanged = FileRepository::new(db.pool())
            .find_by_id(record.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(unchanged.name, "theirs.txt");
    }

    #[tokio::test]
    async fn test_delete_removes_metadata_and_blob() {
        let (db, storage, service, owner_id) = setup().await;

        let record = service
            .upload(owner_id, b"x", "gone.txt", "text/plain")
            .await
            .unwrap();
        assert!(storage.contains(&record.object_id));

        service.delete(owner_id, record.id).await.unwrap();
        assert!(!storage.contains(&record.object_id));
        assert!(FileRepository::new(db.pool())
            .find_by_id(record.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_delete_twice_yields_not_found() {
        let (_db, _storage, service, owner_id) = setup().await;

        let record = service
            .upload(owner_id, b"x", "once.txt", "text/plain")
            .await
            .unwrap();

        service.delete(owner_id, record.id).await.unwrap();
        let result = service.delete(owner_id, record.id).await;
        assert!(matches!(result, Err(CirrusError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_foreign_file_not_found() {
        let (db, _storage, service, owner_id) = setup().await;
        let other = UserRepository::new(db.pool())
            .create(&NewUser::new("Other", "other@example.com", "$hash"))
            .await
            .unwrap();

        let record = service
            .upload(other.id, b"x", "theirs.txt", "text/plain")
            .await
            .unwrap();

        let result = service.delete(owner_id, record.id).await;
        assert!(matches!(result, Err(CirrusError::NotFound(_))));
        assert!(FileRepository::new(db.pool())
            .find_by_id(record.id)
            .await
            .unwrap()
            .is_some());
    }
}

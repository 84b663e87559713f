//! Blob store adapter for Cirrus.
//!
//! Binary content lives in an external object-storage service; this module
//! only knows how to hand bytes over and get back a durable URL plus an
//! opaque object identifier. Metadata stays in the file registry.

use std::collections::HashMap;
use std::sync::Mutex;

use axum::async_trait;
use serde::Deserialize;
use url::Url;
use uuid::Uuid;

use crate::{CirrusError, Result};

/// Result of persisting an object in the blob store.
#[derive(Debug, Clone)]
pub struct StoredObject {
    /// Durable URL the object is reachable at.
    pub url: String,
    /// Opaque storage-provider identifier.
    pub object_id: String,
    /// Confirmed size in bytes, as reported by the store.
    pub size: i64,
}

/// External object-storage capability.
///
/// Implementations must be safe to share across request tasks.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Persist `content` and return the stored object description.
    async fn put(
        &self,
        content: &[u8],
        original_name: &str,
        content_type: &str,
    ) -> Result<StoredObject>;

    /// Remove an object by its identifier.
    async fn remove(&self, object_id: &str) -> Result<()>;
}

/// Wire format of the storage service's upload response.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: String,
    id: String,
    bytes: i64,
}

/// Blob store client talking to an object-storage service over HTTPS.
pub struct HttpBlobStore {
    client: reqwest::Client,
    endpoint: Url,
    api_key: String,
    folder: String,
}

impl HttpBlobStore {
    /// Create a new client for the given service endpoint.
    pub fn new(endpoint: &str, api_key: &str, folder: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| CirrusError::Config(format!("invalid storage endpoint: {e}")))?;

        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
            api_key: api_key.to_string(),
            folder: folder.to_string(),
        })
    }

    fn objects_url(&self) -> Result<Url> {
        self.endpoint
            .join("objects")
            .map_err(|e| CirrusError::Storage(format!("invalid storage endpoint: {e}")))
    }
}

#[async_trait]
impl BlobStore for HttpBlobStore {
    async fn put(
        &self,
        content: &[u8],
        original_name: &str,
        content_type: &str,
    ) -> Result<StoredObject> {
        let part = reqwest::multipart::Part::bytes(content.to_vec())
            .file_name(original_name.to_string())
            .mime_str(content_type)
            .map_err(|e| CirrusError::Storage(format!("invalid content type: {e}")))?;
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("folder", self.folder.clone());

        let response = self
            .client
            .post(self.objects_url()?)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| CirrusError::Storage(format!("upload request failed: {e}")))?
            .error_for_status()
            .map_err(|e| CirrusError::Storage(format!("upload rejected: {e}")))?;

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| CirrusError::Storage(format!("malformed upload response: {e}")))?;

        Ok(StoredObject {
            url: body.url,
            object_id: body.id,
            size: body.bytes,
        })
    }

    async fn remove(&self, object_id: &str) -> Result<()> {
        self.client
            .delete(self.objects_url()?)
            .bearer_auth(&self.api_key)
            .query(&[("id", object_id)])
            .send()
            .await
            .map_err(|e| CirrusError::Storage(format!("delete request failed: {e}")))?
            .error_for_status()
            .map_err(|e| CirrusError::Storage(format!("delete rejected: {e}")))?;

        Ok(())
    }
}

/// In-memory blob store for local development and tests.
///
/// Contents are lost on restart; never use this against real data.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an object with the given identifier is present.
    pub fn contains(&self, object_id: &str) -> bool {
        self.objects.lock().unwrap().contains_key(object_id)
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    /// Whether the store holds no objects.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(
        &self,
        content: &[u8],
        _original_name: &str,
        _content_type: &str,
    ) -> Result<StoredObject> {
        if content.is_empty() {
            return Err(CirrusError::Storage("empty content".to_string()));
        }

        let object_id = Uuid::new_v4().to_string();
        let size = content.len() as i64;
        self.objects
            .lock()
            .unwrap()
            .insert(object_id.clone(), content.to_vec());

        Ok(StoredObject {
            url: format!("memory://{object_id}"),
            object_id,
            size,
        })
    }

    async fn remove(&self, object_id: &str) -> Result<()> {
        self.objects.lock().unwrap().remove(object_id);
        Ok(())
    }
}

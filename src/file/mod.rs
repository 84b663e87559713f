//! File management module for Cirrus.
//!
//! Metadata lives in the file registry (SQLite); binary content is
//! delegated to an external blob store.

pub mod metadata;
pub mod service;
pub mod storage;

pub use metadata::{CategoryAggregate, FileCategory, FileRecord, FileRepository, NewFile};
pub use service::{FileService, DEFAULT_PAGE_SIZE};
pub use storage::{BlobStore, HttpBlobStore, MemoryBlobStore, StoredObject};

//! Storage abstraction trait

use async_trait::async_trait;
use std::pin::Pin;
use thiserror::Error;
use tokio::io::AsyncWrite;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("File exceeds the {limit} byte limit")]
    LimitExceeded { limit: u64 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Sink for an upload being written incrementally.
pub type StorageWriter = Pin<Box<dyn AsyncWrite + Send + Sync + Unpin>>;

/// Storage backend for uploaded files.
///
/// Every key passed in must come from [`crate::generate_upload_key`] or
/// otherwise satisfy the flat key format described at the crate root.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Open a new object for writing. An existing object under the key is truncated.
    async fn create(&self, key: &str) -> StorageResult<StorageWriter>;

    async fn download(&self, key: &str) -> StorageResult<Vec<u8>>;

    /// Delete an object. Deleting a missing key succeeds.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Public URL under which the object is served.
    fn public_url(&self, key: &str) -> String;
}

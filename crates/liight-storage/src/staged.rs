//! Staged uploads.
//!
//! A `StagedUpload` is created when an upload starts arriving and owns the
//! stored object until the request either commits it or discards it. Failure
//! paths call [`StagedUpload::discard`] and await it; dropping a handle that
//! was neither committed nor discarded schedules a best-effort delete.

use std::sync::Arc;

use tokio::io::AsyncWriteExt;

use crate::keys::generate_upload_key;
use crate::traits::{Storage, StorageError, StorageResult, StorageWriter};

pub struct StagedUpload {
    storage: Arc<dyn Storage>,
    key: String,
    original_name: String,
    writer: Option<StorageWriter>,
    size: u64,
    limit: u64,
    settled: bool,
}

impl StagedUpload {
    /// Create the backing object under a freshly generated key.
    pub async fn begin(
        storage: Arc<dyn Storage>,
        original_name: &str,
        limit: u64,
    ) -> StorageResult<Self> {
        let key = generate_upload_key(original_name);
        let writer = storage.create(&key).await?;
        tracing::debug!(key = %key, original_name, "Staged upload started");
        Ok(Self {
            storage,
            key,
            original_name: original_name.to_string(),
            writer: Some(writer),
            size: 0,
            limit,
            settled: false,
        })
    }

    /// Stage an upload whose bytes are already in memory.
    pub async fn from_bytes(
        storage: Arc<dyn Storage>,
        original_name: &str,
        data: &[u8],
        limit: u64,
    ) -> StorageResult<Self> {
        let mut staged = Self::begin(storage, original_name, limit).await?;
        // On error `staged` is dropped here and the backstop removes the object.
        staged.write_chunk(data).await?;
        staged.finish().await?;
        Ok(staged)
    }

    /// Append a chunk. Fails with `LimitExceeded` once the total passes the limit.
    pub async fn write_chunk(&mut self, chunk: &[u8]) -> StorageResult<()> {
        let new_size = self.size + chunk.len() as u64;
        if new_size > self.limit {
            return Err(StorageError::LimitExceeded { limit: self.limit });
        }
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| StorageError::UploadFailed("Upload already finished".to_string()))?;
        writer.write_all(chunk).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write {}: {}", self.key, e))
        })?;
        self.size = new_size;
        Ok(())
    }

    /// Flush and close the writer. Idempotent.
    pub async fn finish(&mut self) -> StorageResult<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush().await?;
            writer.shutdown().await?;
            tracing::debug!(key = %self.key, size_bytes = self.size, "Staged upload written");
        }
        Ok(())
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn public_url(&self) -> String {
        self.storage.public_url(&self.key)
    }

    /// Read the staged object back, e.g. to attach it to a message.
    pub async fn read(&self) -> StorageResult<Vec<u8>> {
        self.storage.download(&self.key).await
    }

    /// Keep the object. Returns its key.
    pub fn commit(mut self) -> String {
        self.settled = true;
        tracing::info!(key = %self.key, size_bytes = self.size, "Upload committed");
        std::mem::take(&mut self.key)
    }

    /// Delete the object now.
    pub async fn discard(mut self) -> StorageResult<()> {
        self.settled = true;
        self.writer.take();
        let result = self.storage.delete(&self.key).await;
        match &result {
            Ok(()) => tracing::info!(key = %self.key, "Staged upload discarded"),
            Err(e) => tracing::error!(key = %self.key, error = %e, "Failed to discard staged upload"),
        }
        result
    }
}

impl Drop for StagedUpload {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        self.writer.take();
        let storage = Arc::clone(&self.storage);
        let key = std::mem::take(&mut self.key);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                tracing::warn!(key = %key, "Staged upload dropped without commit; scheduling delete");
                handle.spawn(async move {
                    if let Err(e) = storage.delete(&key).await {
                        tracing::error!(key = %key, error = %e, "Deferred delete of staged upload failed");
                    }
                });
            }
            Err(_) => {
                tracing::error!(key = %key, "Staged upload dropped outside a runtime; file left behind");
            }
        }
    }
}

impl std::fmt::Debug for StagedUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StagedUpload")
            .field("key", &self.key)
            .field("original_name", &self.original_name)
            .field("size", &self.size)
            .field("settled", &self.settled)
            .finish()
    }
}

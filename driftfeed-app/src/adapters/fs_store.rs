//! Filesystem-backed snapshot storage
//!
//! Real [`FileStore`] implementation over `tokio::fs`. Writes go through a
//! sibling temp file followed by a rename, so a reader of the target path
//! observes either the old complete content or the new complete content,
//! never a torn mix.

use std::io::ErrorKind;
use std::path::Path;

use async_trait::async_trait;
use driftfeed_core::error::{CoreError, CoreResult};
use driftfeed_core::traits::FileStore;
use tokio::io::AsyncWriteExt;

/// Refuse to read snapshot files beyond this size; a preference file this
/// large is damaged, and slurping it would stall the loader.
const MAX_SNAPSHOT_FILE_SIZE: u64 = 10 * 1024 * 1024; // 10MB

/// Snapshot storage on the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFileStore;

impl TokioFileStore {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileStore for TokioFileStore {
    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }

    async fn create_empty(&self, path: &Path) -> CoreResult<()> {
        match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await
        {
            Ok(_) => Ok(()),
            // Already present: leave whatever content it has untouched.
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(CoreError::StorageError(format!(
                "failed to create {}: {e}",
                path.display()
            ))),
        }
    }

    async fn read_all(&self, path: &Path) -> CoreResult<Vec<u8>> {
        let metadata = tokio::fs::metadata(path).await.map_err(|e| {
            CoreError::StorageError(format!("failed to stat {}: {e}", path.display()))
        })?;
        if metadata.len() > MAX_SNAPSHOT_FILE_SIZE {
            return Err(CoreError::StorageError(format!(
                "snapshot file too large: {} bytes (max: {MAX_SNAPSHOT_FILE_SIZE} bytes)",
                metadata.len()
            )));
        }

        tokio::fs::read(path).await.map_err(|e| {
            CoreError::StorageError(format!("failed to read {}: {e}", path.display()))
        })
    }

    async fn write_all(&self, path: &Path, bytes: &[u8]) -> CoreResult<()> {
        // Temp file + rename. The rename is the publication point; the data
        // is flushed first so the rename never exposes a partial write.
        let tmp_path = path.with_extension("tmp");

        let mut file = tokio::fs::File::create(&tmp_path).await.map_err(|e| {
            CoreError::StorageError(format!("failed to create {}: {e}", tmp_path.display()))
        })?;
        file.write_all(bytes).await.map_err(|e| {
            CoreError::StorageError(format!("failed to write {}: {e}", tmp_path.display()))
        })?;
        file.sync_all().await.map_err(|e| {
            CoreError::StorageError(format!("failed to flush {}: {e}", tmp_path.display()))
        })?;
        drop(file);

        tokio::fs::rename(&tmp_path, path).await.map_err(|e| {
            CoreError::StorageError(format!(
                "failed to replace {} with {}: {e}",
                path.display(),
                tmp_path.display()
            ))
        })
    }
}

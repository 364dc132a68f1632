//! Test helper module
//!
//! In-memory [`FileStore`] with injectable failures and a per-path write
//! history, so service tests can assert on ordering and error paths without
//! touching a real filesystem.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::traits::FileStore;

pub struct MockFileStore {
    files: RwLock<HashMap<PathBuf, Vec<u8>>>,
    /// Every successful write per path, oldest first.
    writes: RwLock<HashMap<PathBuf, Vec<Vec<u8>>>>,
    fail_next_read: RwLock<bool>,
    fail_next_write: RwLock<bool>,
}

impl MockFileStore {
    pub fn new() -> Self {
        Self {
            files: RwLock::new(HashMap::new()),
            writes: RwLock::new(HashMap::new()),
            fail_next_read: RwLock::new(false),
            fail_next_write: RwLock::new(false),
        }
    }

    /// Make the next `read_all` fail with a `StorageError`.
    pub async fn fail_next_read(&self) {
        *self.fail_next_read.write().await = true;
    }

    /// Make the next `write_all` fail with a `StorageError`.
    pub async fn fail_next_write(&self) {
        *self.fail_next_write.write().await = true;
    }

    /// Successful writes observed for `path`, in order.
    pub async fn writes_for(&self, path: &Path) -> Vec<Vec<u8>> {
        self.writes
            .read()
            .await
            .get(path)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl FileStore for MockFileStore {
    async fn exists(&self, path: &Path) -> bool {
        self.files.read().await.contains_key(path)
    }

    async fn create_empty(&self, path: &Path) -> CoreResult<()> {
        // Never truncates existing content.
        self.files
            .write()
            .await
            .entry(path.to_path_buf())
            .or_default();
        Ok(())
    }

    async fn read_all(&self, path: &Path) -> CoreResult<Vec<u8>> {
        if std::mem::take(&mut *self.fail_next_read.write().await) {
            return Err(CoreError::StorageError("injected read failure".to_string()));
        }
        self.files
            .read()
            .await
            .get(path)
            .cloned()
            .ok_or_else(|| CoreError::StorageError(format!("no such file: {}", path.display())))
    }

    async fn write_all(&self, path: &Path, bytes: &[u8]) -> CoreResult<()> {
        if std::mem::take(&mut *self.fail_next_write.write().await) {
            return Err(CoreError::StorageError(
                "injected write failure".to_string(),
            ));
        }
        self.files
            .write()
            .await
            .insert(path.to_path_buf(), bytes.to_vec());
        self.writes
            .write()
            .await
            .entry(path.to_path_buf())
            .or_default()
            .push(bytes.to_vec());
        Ok(())
    }
}

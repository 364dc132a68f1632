//! Byte storage abstract trait

use std::path::Path;

use async_trait::async_trait;

use crate::error::CoreResult;

/// Path-addressed byte storage.
///
/// Platform implementation:
/// - Desktop/mobile: `TokioFileStore` in `driftfeed-app` (real filesystem,
///   atomic replace-on-write)
/// - Tests: `MockFileStore` (in-memory, injectable failures)
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Whether a file exists at `path`. Pure check, never fails.
    async fn exists(&self, path: &Path) -> bool;

    /// Create a zero-length file at `path`.
    ///
    /// Idempotent success if the file already exists; must never truncate
    /// existing content. The containing directory must already exist.
    async fn create_empty(&self, path: &Path) -> CoreResult<()>;

    /// Read the complete contents of the file at `path`.
    async fn read_all(&self, path: &Path) -> CoreResult<Vec<u8>>;

    /// Replace the full contents of the file at `path` with `bytes`.
    ///
    /// Must be atomic with respect to concurrent readers of the same path:
    /// either the old complete content or the new complete content is
    /// observable, never a partial mix. A torn write here corrupts the next
    /// startup's decode, so this is the most safety-critical contract in
    /// the subsystem.
    async fn write_all(&self, path: &Path, bytes: &[u8]) -> CoreResult<()>;
}

//! Platform data directory resolution

use std::path::PathBuf;

use driftfeed_core::error::{CoreError, CoreResult};

/// Bundle identifier used for the per-user data directory.
const BUNDLE_ID: &str = "org.driftfeed.client";

/// Default per-user data directory for snapshot files:
/// - macOS: `~/Library/Application Support/org.driftfeed.client/`
/// - Windows: `%LOCALAPPDATA%/org.driftfeed.client/`
/// - Linux: `~/.local/share/org.driftfeed.client/`
pub fn default_data_dir() -> CoreResult<PathBuf> {
    dirs::data_local_dir()
        .map(|dir| dir.join(BUNDLE_ID))
        .ok_or_else(|| {
            CoreError::StorageError(
                "failed to determine platform data directory".to_string(),
            )
        })
}

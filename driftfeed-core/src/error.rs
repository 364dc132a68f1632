//! Unified error type definition

use thiserror::Error;

/// Core layer error type
#[derive(Error, Debug)]
pub enum CoreError {
    /// In-memory value cannot be serialized. Always a data-shape defect,
    /// never retryable.
    #[error("Encoding error: {0}")]
    EncodingError(String),

    /// Persisted bytes do not match the expected shape for the requested
    /// target. Treated as file corruption; the affected collection falls
    /// back to its empty default instead of aborting startup.
    #[error("Decoding error: {0}")]
    DecodingError(String),

    /// Snapshot file was written by an unknown format version.
    #[error("Unsupported snapshot file version: {0}")]
    UnsupportedFileVersion(u32),

    /// Storage layer error (missing path, permissions, I/O failure)
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Validation error (builder misuse, duplicate account identity)
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl CoreError {
    /// Whether this is expected behavior (corrupt file on disk, stale format,
    /// caller input) rather than a defect, used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error`
    /// when returning `false`. Update this method when new variants are added.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::DecodingError(_) | Self::UnsupportedFileVersion(_) | Self::ValidationError(_) => {
                true
            }
            Self::EncodingError(_) | Self::StorageError(_) => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

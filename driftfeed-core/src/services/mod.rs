//! Synchronization service layer

mod bootstrap_service;
mod persist_service;

pub use bootstrap_service::{BootstrapOutcome, BootstrapReport, BootstrapService};
pub use persist_service::PersistService;

use std::sync::Arc;

use crate::traits::FileStore;
use crate::types::StatePaths;

/// Service context - holds the storage adapter and snapshot file locations.
///
/// The platform layer creates this context and injects its storage
/// implementation; the services hold no ambient state of their own.
pub struct ServiceContext {
    /// Byte storage adapter
    pub file_store: Arc<dyn FileStore>,
    /// Snapshot file locations
    pub paths: StatePaths,
}

impl ServiceContext {
    /// Create a service context.
    #[must_use]
    pub fn new(file_store: Arc<dyn FileStore>, paths: StatePaths) -> Self {
        Self { file_store, paths }
    }
}

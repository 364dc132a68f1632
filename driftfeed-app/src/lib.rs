//! Platform-agnostic application bootstrap for Driftfeed state sync.
//!
//! Provides `AppState` (tracker + services container) and `AppStateBuilder`
//! (adapter injection). A frontend constructs one `AppState` at startup,
//! injects its storage adapter and data directory, runs the startup
//! sequence, and from then on mutates collections only through
//! [`StateTracker`]; persistence happens on background writer tasks.
//!
//! There is no ambient/singleton state: everything the sync core needs is
//! passed in at construction time.

pub mod adapters;

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use driftfeed_core::error::{CoreError, CoreResult};
use driftfeed_core::services::{BootstrapReport, BootstrapService, PersistService};
use driftfeed_core::tracker::{ChangeStream, StateTracker};
use driftfeed_core::traits::FileStore;
use driftfeed_core::types::StatePaths;
use driftfeed_core::ServiceContext;
use tokio::task::JoinHandle;

/// Application state for the persistence core.
///
/// Owns the [`StateTracker`] (and with it the change streams' send side), the
/// service context, and the background writer tasks. Dropping or shutting
/// down the `AppState` closes the change streams, which lets the writers
/// drain pending snapshots and exit.
pub struct AppState {
    ctx: Arc<ServiceContext>,
    tracker: StateTracker,
    streams: Option<(ChangeStream, ChangeStream)>,
    writers: Vec<JoinHandle<()>>,
    /// Whether the startup load-or-create sequence has completed. The UI
    /// holds off interactive use of the collections until this is set.
    pub bootstrap_completed: AtomicBool,
}

impl AppState {
    /// The tracked-collection owner. All mutations go through here.
    #[must_use]
    pub fn tracker(&self) -> &StateTracker {
        &self.tracker
    }

    /// Run the full startup sequence: ensure the data directory, reconcile
    /// each snapshot file with the tracker, then start one writer task per
    /// collection kind.
    ///
    /// Storage and decode failures during reconciliation do not fail
    /// startup; they surface in the returned [`BootstrapReport`]. The only
    /// hard errors are a missing data directory that cannot be created and
    /// calling this twice.
    pub async fn run_startup(&mut self) -> CoreResult<BootstrapReport> {
        let (accounts_stream, keywords_stream) = self
            .streams
            .take()
            .ok_or_else(|| CoreError::ValidationError("startup already ran".to_string()))?;

        tokio::fs::create_dir_all(self.ctx.paths.data_dir())
            .await
            .map_err(|e| {
                CoreError::StorageError(format!(
                    "failed to create data directory {}: {e}",
                    self.ctx.paths.data_dir().display()
                ))
            })?;

        let report = BootstrapService::new(Arc::clone(&self.ctx))
            .bootstrap(&self.tracker)
            .await;

        // One writer per kind: each kind's writes stay in mutation order
        // while the two kinds persist independently of each other.
        let persist = Arc::new(PersistService::new(Arc::clone(&self.ctx)));
        for stream in [accounts_stream, keywords_stream] {
            let service = Arc::clone(&persist);
            self.writers
                .push(tokio::spawn(async move { service.run(stream).await }));
        }

        self.bootstrap_completed.store(true, Ordering::SeqCst);
        Ok(report)
    }

    /// Close the change streams and wait for the writers to drain every
    /// pending snapshot to disk.
    pub async fn shutdown(self) {
        let Self {
            tracker, writers, ..
        } = self;
        // Dropping the tracker drops the stream senders; the writer loops
        // finish whatever is queued and then exit.
        drop(tracker);
        for handle in writers {
            if handle.await.is_err() {
                log::warn!("Snapshot writer task terminated abnormally");
            }
        }
    }
}

/// Builder for constructing `AppState` with platform-specific adapters.
///
/// # Required
/// - `file_store` — how snapshot bytes are stored
/// - `data_dir` — directory holding the per-kind snapshot files
pub struct AppStateBuilder {
    file_store: Option<Arc<dyn FileStore>>,
    data_dir: Option<PathBuf>,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            file_store: None,
            data_dir: None,
        }
    }

    #[must_use]
    pub fn file_store(mut self, store: Arc<dyn FileStore>) -> Self {
        self.file_store = Some(store);
        self
    }

    #[must_use]
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::ValidationError` if required adapters are missing.
    pub fn build(self) -> CoreResult<AppState> {
        let file_store = self
            .file_store
            .ok_or_else(|| CoreError::ValidationError("file_store is required".to_string()))?;
        let data_dir = self
            .data_dir
            .ok_or_else(|| CoreError::ValidationError("data_dir is required".to_string()))?;

        let ctx = Arc::new(ServiceContext::new(file_store, StatePaths::new(data_dir)));
        let (tracker, accounts_stream, keywords_stream) = StateTracker::new();

        Ok(AppState {
            ctx,
            tracker,
            streams: Some((accounts_stream, keywords_stream)),
            writers: Vec::new(),
            bootstrap_completed: AtomicBool::new(false),
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

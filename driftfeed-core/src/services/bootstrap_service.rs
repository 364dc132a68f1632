//! Startup state recovery service
//!
//! Reconciles each on-disk snapshot with the in-memory tracker before normal
//! operation begins: an existing file is read, decoded and installed; a
//! missing file is created empty. Availability wins over durability — a
//! corrupt or unreadable file is logged and the collection starts empty, so
//! a bad byte on disk can never block startup.

use std::sync::Arc;

use crate::codec;
use crate::error::CoreError;
use crate::services::ServiceContext;
use crate::tracker::StateTracker;
use crate::types::CollectionKind;

/// What happened to one collection during bootstrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// Snapshot file existed and decoded; holds the record count.
    Loaded(usize),
    /// No snapshot file existed; an empty one was created.
    Created,
    /// The file existed but could not be read or decoded; the collection
    /// starts at its default-empty value.
    Recovered,
}

/// Per-collection bootstrap outcomes.
#[derive(Debug, Clone)]
pub struct BootstrapReport {
    pub accounts: BootstrapOutcome,
    pub filtered_keywords: BootstrapOutcome,
}

/// Startup state recovery service
pub struct BootstrapService {
    ctx: Arc<ServiceContext>,
}

impl BootstrapService {
    /// Create a bootstrap service instance.
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Run the load-or-create sequence for both collections.
    ///
    /// Never fails: every storage or decode error is caught here, logged,
    /// and converted into a [`BootstrapOutcome::Recovered`] fallback. The UI
    /// layer above never sees a startup error for preference data.
    pub async fn bootstrap(&self, tracker: &StateTracker) -> BootstrapReport {
        let accounts = self.bootstrap_kind(tracker, CollectionKind::Accounts).await;
        let filtered_keywords = self
            .bootstrap_kind(tracker, CollectionKind::FilteredKeywords)
            .await;
        BootstrapReport {
            accounts,
            filtered_keywords,
        }
    }

    async fn bootstrap_kind(
        &self,
        tracker: &StateTracker,
        kind: CollectionKind,
    ) -> BootstrapOutcome {
        let path = self.ctx.paths.for_kind(kind);

        if !self.ctx.file_store.exists(&path).await {
            log::info!("{kind} snapshot does not exist, creating empty file");
            if let Err(e) = self.ctx.file_store.create_empty(&path).await {
                log::error!("Failed to create empty {kind} snapshot: {e}");
                return BootstrapOutcome::Recovered;
            }
            return BootstrapOutcome::Created;
        }

        let bytes = match self.ctx.file_store.read_all(&path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                report(kind, &e);
                return BootstrapOutcome::Recovered;
            }
        };

        match codec::decode(&bytes, kind) {
            Ok(snapshot) => {
                let count = snapshot.len();
                tracker.install(snapshot).await;
                log::info!("Loaded {count} {kind} records from snapshot");
                BootstrapOutcome::Loaded(count)
            }
            Err(e) => {
                report(kind, &e);
                BootstrapOutcome::Recovered
            }
        }
    }
}

/// Log a bootstrap failure at the level its classification calls for.
fn report(kind: CollectionKind, error: &CoreError) {
    if error.is_expected() {
        log::warn!("{kind} snapshot unusable, starting empty: {error}");
    } else {
        log::error!("{kind} snapshot unusable, starting empty: {error}");
    }
}

//! Steady-state persistence service
//!
//! Consumes a collection's change stream and writes every snapshot to disk
//! in notification order. Persistence is best-effort: a failed write is
//! logged and dropped, the in-memory value stays authoritative, and the next
//! successful write supersedes the loss. There is no coalescing — every
//! notification produces one write attempt, matching the ordering property
//! that snapshots on disk appear in mutation order.

use std::sync::Arc;

use crate::codec;
use crate::error::CoreResult;
use crate::services::ServiceContext;
use crate::tracker::ChangeStream;
use crate::types::Snapshot;

/// Steady-state persistence service
pub struct PersistService {
    ctx: Arc<ServiceContext>,
}

impl PersistService {
    /// Create a persistence service instance.
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Encode a snapshot and atomically replace its file.
    pub async fn persist(&self, snapshot: &Snapshot) -> CoreResult<()> {
        let bytes = codec::encode(snapshot)?;
        let path = self.ctx.paths.for_kind(snapshot.kind());
        self.ctx.file_store.write_all(&path, &bytes).await
    }

    /// Drive one collection's writer loop until its change stream closes.
    ///
    /// Writes for this collection are applied in the exact order the
    /// mutations occurred; a failure affects only the snapshot it carried.
    pub async fn run(&self, mut stream: ChangeStream) {
        let kind = stream.kind();
        while let Some(snapshot) = stream.next().await {
            if let Err(e) = self.persist(&snapshot).await {
                // Best-effort: the in-memory value remains the source of
                // truth until the next successful write.
                log::error!("Failed to persist {kind} snapshot: {e}");
            }
        }
        log::debug!("{kind} writer stopped, change stream closed");
    }
}

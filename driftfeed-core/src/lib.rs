//! Driftfeed Core Library
//!
//! Local persisted-state synchronization core for the Driftfeed client:
//! keeps the saved-accounts and filtered-keywords collections durable across
//! restarts. Provides:
//! - Snapshot codec (versioned JSON envelope)
//! - State tracker with ordered change streams
//! - Bootstrap (load-or-create) and persistence services
//!
//! This library is platform-independent, abstracting byte storage through
//! the [`FileStore`] trait; the platform layer supplies the real adapter.

pub mod codec;
pub mod error;
pub mod services;
pub mod tracker;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::ServiceContext;
pub use tracker::{ChangeStream, StateTracker};
pub use traits::FileStore;
pub use types::{CollectionKind, SavedAccount, Snapshot, StatePaths};

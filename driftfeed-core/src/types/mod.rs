//! Core type definitions

mod account;

pub use account::SavedAccount;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Which tracked collection a snapshot file holds.
///
/// This is the decode target: the caller picks the kind based on which file
/// is being loaded, never by inspecting the bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CollectionKind {
    /// Saved user accounts
    Accounts,
    /// User-maintained keyword filter list
    FilteredKeywords,
}

impl CollectionKind {
    /// Fixed file name for this kind's snapshot, relative to the data dir.
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Accounts => "saved_accounts.json",
            Self::FilteredKeywords => "filtered_keywords.json",
        }
    }

    /// Stable name for log lines.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Accounts => "accounts",
            Self::FilteredKeywords => "filteredKeywords",
        }
    }
}

impl std::fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complete value of one tracked collection, as carried by change
/// notifications and the codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Snapshot {
    /// Full saved-accounts collection
    Accounts(Vec<SavedAccount>),
    /// Full keyword filter list
    FilteredKeywords(Vec<String>),
}

impl Snapshot {
    /// The collection kind this snapshot belongs to.
    #[must_use]
    pub fn kind(&self) -> CollectionKind {
        match self {
            Self::Accounts(_) => CollectionKind::Accounts,
            Self::FilteredKeywords(_) => CollectionKind::FilteredKeywords,
        }
    }

    /// Default-empty snapshot for a kind.
    #[must_use]
    pub fn empty(kind: CollectionKind) -> Self {
        match kind {
            CollectionKind::Accounts => Self::Accounts(Vec::new()),
            CollectionKind::FilteredKeywords => Self::FilteredKeywords(Vec::new()),
        }
    }

    /// Number of records in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Accounts(items) => items.len(),
            Self::FilteredKeywords(items) => items.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-wide-known snapshot file locations, one per collection kind.
///
/// Constructed from an explicit data directory and passed into the services
/// at construction time; there is no ambient default inside the core.
#[derive(Debug, Clone)]
pub struct StatePaths {
    data_dir: PathBuf,
}

impl StatePaths {
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Directory that holds both snapshot files.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Full path of the snapshot file for a kind.
    #[must_use]
    pub fn for_kind(&self, kind: CollectionKind) -> PathBuf {
        self.data_dir.join(kind.file_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_fixed_per_kind() {
        let paths = StatePaths::new("/tmp/driftfeed");
        assert!(paths
            .for_kind(CollectionKind::Accounts)
            .ends_with("saved_accounts.json"));
        assert!(paths
            .for_kind(CollectionKind::FilteredKeywords)
            .ends_with("filtered_keywords.json"));
    }

    #[test]
    fn snapshot_kind_matches_variant() {
        assert_eq!(
            Snapshot::empty(CollectionKind::Accounts).kind(),
            CollectionKind::Accounts
        );
        assert_eq!(
            Snapshot::empty(CollectionKind::FilteredKeywords).kind(),
            CollectionKind::FilteredKeywords
        );
    }
}

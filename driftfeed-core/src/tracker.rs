//! Tracked collection ownership and change notification
//!
//! [`StateTracker`] exclusively owns the two tracked collections for the
//! lifetime of the process. Every mutation publishes the complete new value
//! on that collection's [`ChangeStream`]; the snapshot is sent while the
//! write lock is still held, so delivery order always equals mutation order
//! and a handler never observes a torn value.
//!
//! The tracker always notifies on write, including writes that produce a
//! structurally identical value. No-op suppression, like identity
//! deduplication, is the caller's concern.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::RwLock;
use url::Url;

use crate::error::{CoreError, CoreResult};
use crate::types::{CollectionKind, SavedAccount, Snapshot};

/// Ordered stream of full-value change notifications for one collection kind.
pub struct ChangeStream {
    kind: CollectionKind,
    rx: UnboundedReceiver<Snapshot>,
}

impl ChangeStream {
    /// Which collection this stream reports on.
    #[must_use]
    pub fn kind(&self) -> CollectionKind {
        self.kind
    }

    /// Next snapshot, in mutation order. `None` once the tracker is gone and
    /// all pending notifications have been drained.
    pub async fn next(&mut self) -> Option<Snapshot> {
        self.rx.recv().await
    }
}

/// Owner of the saved-accounts and filtered-keywords collections.
pub struct StateTracker {
    accounts: RwLock<Vec<SavedAccount>>,
    filtered_keywords: RwLock<Vec<String>>,
    accounts_tx: UnboundedSender<Snapshot>,
    keywords_tx: UnboundedSender<Snapshot>,
}

impl StateTracker {
    /// Create an empty tracker along with one change stream per collection.
    ///
    /// The streams are independent: writes to the two collections may be
    /// consumed concurrently, while each stream on its own is strictly
    /// ordered.
    #[must_use]
    pub fn new() -> (Self, ChangeStream, ChangeStream) {
        let (accounts_tx, accounts_rx) = mpsc::unbounded_channel();
        let (keywords_tx, keywords_rx) = mpsc::unbounded_channel();
        let tracker = Self {
            accounts: RwLock::new(Vec::new()),
            filtered_keywords: RwLock::new(Vec::new()),
            accounts_tx,
            keywords_tx,
        };
        let accounts_stream = ChangeStream {
            kind: CollectionKind::Accounts,
            rx: accounts_rx,
        };
        let keywords_stream = ChangeStream {
            kind: CollectionKind::FilteredKeywords,
            rx: keywords_rx,
        };
        (tracker, accounts_stream, keywords_stream)
    }

    /// Current saved accounts.
    pub async fn accounts(&self) -> Vec<SavedAccount> {
        self.accounts.read().await.clone()
    }

    /// Current keyword filter list.
    pub async fn filtered_keywords(&self) -> Vec<String> {
        self.filtered_keywords.read().await.clone()
    }

    /// Replace the saved-accounts collection and notify.
    pub async fn replace_accounts(&self, accounts: Vec<SavedAccount>) {
        let mut guard = self.accounts.write().await;
        *guard = accounts;
        self.notify_accounts(&guard);
    }

    /// Replace the keyword filter list and notify.
    pub async fn replace_filtered_keywords(&self, keywords: Vec<String>) {
        let mut guard = self.filtered_keywords.write().await;
        *guard = keywords;
        self.notify_keywords(&guard);
    }

    /// Append an account and notify.
    ///
    /// Rejects an account whose `(instance_address, username)` identity is
    /// already present; the collection is left untouched and no notification
    /// is sent in that case.
    pub async fn add_account(&self, account: SavedAccount) -> CoreResult<()> {
        let mut guard = self.accounts.write().await;
        if guard.iter().any(|a| a.same_identity(&account)) {
            return Err(CoreError::ValidationError(format!(
                "account '{}' on {} is already saved",
                account.username, account.instance_address
            )));
        }
        guard.push(account);
        self.notify_accounts(&guard);
        Ok(())
    }

    /// Remove the account with the given identity, if present, and notify.
    ///
    /// Returns whether an account was removed. No notification on a miss.
    pub async fn remove_account(&self, instance_address: &Url, username: &str) -> bool {
        let mut guard = self.accounts.write().await;
        let before = guard.len();
        guard.retain(|a| !(a.instance_address == *instance_address && a.username == username));
        let removed = guard.len() != before;
        if removed {
            self.notify_accounts(&guard);
        }
        removed
    }

    /// Append a keyword and notify. Duplicates are allowed.
    pub async fn add_keyword(&self, keyword: String) {
        let mut guard = self.filtered_keywords.write().await;
        guard.push(keyword);
        self.notify_keywords(&guard);
    }

    /// Remove every occurrence of a keyword and notify.
    ///
    /// Returns whether anything was removed. No notification on a miss.
    pub async fn remove_keyword(&self, keyword: &str) -> bool {
        let mut guard = self.filtered_keywords.write().await;
        let before = guard.len();
        guard.retain(|k| k != keyword);
        let removed = guard.len() != before;
        if removed {
            self.notify_keywords(&guard);
        }
        removed
    }

    /// Install a loaded snapshot without raising a change notification.
    ///
    /// Bootstrap-only: notifying here would immediately rewrite the bytes
    /// that were just read from disk.
    pub async fn install(&self, snapshot: Snapshot) {
        match snapshot {
            Snapshot::Accounts(items) => *self.accounts.write().await = items,
            Snapshot::FilteredKeywords(items) => *self.filtered_keywords.write().await = items,
        }
    }

    fn notify_accounts(&self, accounts: &[SavedAccount]) {
        // Send can only fail when the consumer is gone (shutdown); the
        // in-memory value stays authoritative either way.
        let _ = self.accounts_tx.send(Snapshot::Accounts(accounts.to_vec()));
    }

    fn notify_keywords(&self, keywords: &[String]) {
        let _ = self
            .keywords_tx
            .send(Snapshot::FilteredKeywords(keywords.to_vec()));
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn account(instance: &str, username: &str) -> SavedAccount {
        SavedAccount {
            instance_address: Url::parse(instance).unwrap(),
            username: username.to_string(),
            access_token: "tok".to_string(),
        }
    }

    #[tokio::test]
    async fn mutations_notify_in_order_with_full_values() {
        let (tracker, mut accounts_stream, _keywords_stream) = StateTracker::new();

        tracker.add_account(account("https://a.example", "alice")).await.unwrap();
        tracker.add_account(account("https://b.example", "bob")).await.unwrap();
        assert!(tracker.remove_account(&Url::parse("https://a.example").unwrap(), "alice").await);

        let first = accounts_stream.next().await.unwrap();
        let second = accounts_stream.next().await.unwrap();
        let third = accounts_stream.next().await.unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 2);
        assert_eq!(third.len(), 1);
        match third {
            Snapshot::Accounts(items) => assert_eq!(items[0].username, "bob"),
            Snapshot::FilteredKeywords(_) => panic!("wrong snapshot kind"),
        }
    }

    #[tokio::test]
    async fn duplicate_identity_is_rejected_without_notification() {
        let (tracker, mut stream, _k) = StateTracker::new();

        tracker.add_account(account("https://a.example", "alice")).await.unwrap();
        let err = tracker
            .add_account(account("https://a.example", "alice"))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));

        // Only the first add produced a notification.
        assert_eq!(stream.next().await.unwrap().len(), 1);
        drop(tracker);
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn same_username_on_different_instances_is_allowed() {
        let (tracker, _a, _k) = StateTracker::new();
        tracker.add_account(account("https://a.example", "alice")).await.unwrap();
        tracker.add_account(account("https://b.example", "alice")).await.unwrap();
        assert_eq!(tracker.accounts().await.len(), 2);
    }

    #[tokio::test]
    async fn replace_always_notifies_even_when_identical() {
        let (tracker, _a, mut keywords_stream) = StateTracker::new();

        tracker.replace_filtered_keywords(vec!["spoiler".to_string()]).await;
        tracker.replace_filtered_keywords(vec!["spoiler".to_string()]).await;

        assert!(keywords_stream.next().await.is_some());
        assert!(keywords_stream.next().await.is_some());
    }

    #[tokio::test]
    async fn keywords_may_contain_duplicates() {
        let (tracker, _a, _k) = StateTracker::new();
        tracker.add_keyword("politics".to_string()).await;
        tracker.add_keyword("politics".to_string()).await;
        assert_eq!(tracker.filtered_keywords().await.len(), 2);

        assert!(tracker.remove_keyword("politics").await);
        assert!(tracker.filtered_keywords().await.is_empty());
        assert!(!tracker.remove_keyword("politics").await);
    }

    #[tokio::test]
    async fn install_does_not_notify() {
        let (tracker, mut accounts_stream, _k) = StateTracker::new();

        tracker
            .install(Snapshot::Accounts(vec![account("https://a.example", "alice")]))
            .await;
        assert_eq!(tracker.accounts().await.len(), 1);

        drop(tracker);
        assert!(accounts_stream.next().await.is_none());
    }
}

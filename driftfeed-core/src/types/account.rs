//! Saved account type definition

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// A saved user account on a remote instance.
///
/// Uniquely identified by the `(instance_address, username)` pair. The
/// persistence core does not enforce that invariant; [`crate::StateTracker`]'s
/// `add_account` helper rejects duplicates on behalf of its callers.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedAccount {
    /// Address of the remote instance the account belongs to
    pub instance_address: Url,
    /// Handle on that instance
    pub username: String,
    /// Opaque access token. Sensitive: redacted from `Debug` output so it
    /// never reaches a log line.
    pub access_token: String,
}

impl SavedAccount {
    /// Whether two accounts refer to the same identity, i.e. share the
    /// `(instance_address, username)` pair regardless of token.
    #[must_use]
    pub fn same_identity(&self, other: &Self) -> bool {
        self.instance_address == other.instance_address && self.username == other.username
    }
}

impl fmt::Debug for SavedAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SavedAccount")
            .field("instance_address", &self.instance_address.as_str())
            .field("username", &self.username)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn account(instance: &str, username: &str, token: &str) -> SavedAccount {
        SavedAccount {
            instance_address: Url::parse(instance).unwrap(),
            username: username.to_string(),
            access_token: token.to_string(),
        }
    }

    #[test]
    fn same_identity_ignores_token() {
        let a = account("https://example.org", "alice", "tok-1");
        let b = account("https://example.org", "alice", "tok-2");
        let c = account("https://example.org", "bob", "tok-1");
        assert!(a.same_identity(&b));
        assert!(!a.same_identity(&c));
    }

    #[test]
    fn debug_redacts_access_token() {
        let a = account("https://example.org", "alice", "super-secret");
        let rendered = format!("{a:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("alice"));
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let a = account("https://example.org", "alice", "tok123");
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["instanceAddress"], "https://example.org/");
        assert_eq!(json["username"], "alice");
        assert_eq!(json["accessToken"], "tok123");
    }
}

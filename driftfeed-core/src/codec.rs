//! Snapshot codec
//!
//! Serializes tracked collections to a versioned JSON envelope:
//!
//! ```json
//! {"version":1,"kind":"accounts","items":[...]}
//! ```
//!
//! Decode dispatches on the caller-supplied [`CollectionKind`], not on the
//! bytes: the envelope's `kind` must match the requested target or decoding
//! fails. The `version` field lets a future format change surface as
//! [`CoreError::UnsupportedFileVersion`] instead of being mistaken for
//! corruption.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{CollectionKind, SavedAccount, Snapshot};

/// Current snapshot file format version.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct Envelope {
    version: u32,
    kind: CollectionKind,
    items: serde_json::Value,
}

/// Encode a snapshot to its durable byte form.
///
/// Deterministic for a given input: field order follows struct declaration
/// and the output is compact JSON.
pub fn encode(snapshot: &Snapshot) -> CoreResult<Vec<u8>> {
    let items = match snapshot {
        Snapshot::Accounts(items) => serde_json::to_value(items),
        Snapshot::FilteredKeywords(items) => serde_json::to_value(items),
    }
    .map_err(|e| CoreError::EncodingError(e.to_string()))?;

    let envelope = Envelope {
        version: FORMAT_VERSION,
        kind: snapshot.kind(),
        items,
    };
    serde_json::to_vec(&envelope).map_err(|e| CoreError::EncodingError(e.to_string()))
}

/// Decode bytes into the collection the caller expects.
///
/// Zero-length input decodes to the empty collection: a freshly created,
/// never-populated snapshot file is a legal persisted state, not corruption.
pub fn decode(bytes: &[u8], target: CollectionKind) -> CoreResult<Snapshot> {
    if bytes.is_empty() {
        return Ok(Snapshot::empty(target));
    }

    let envelope: Envelope = serde_json::from_slice(bytes)
        .map_err(|e| CoreError::DecodingError(format!("malformed snapshot file: {e}")))?;

    if envelope.version != FORMAT_VERSION {
        return Err(CoreError::UnsupportedFileVersion(envelope.version));
    }
    if envelope.kind != target {
        return Err(CoreError::DecodingError(format!(
            "snapshot holds '{}' but '{}' was requested",
            envelope.kind, target
        )));
    }

    match target {
        CollectionKind::Accounts => {
            let items: Vec<SavedAccount> = serde_json::from_value(envelope.items)
                .map_err(|e| CoreError::DecodingError(format!("invalid account records: {e}")))?;
            Ok(Snapshot::Accounts(items))
        }
        CollectionKind::FilteredKeywords => {
            let items: Vec<String> = serde_json::from_value(envelope.items)
                .map_err(|e| CoreError::DecodingError(format!("invalid keyword list: {e}")))?;
            Ok(Snapshot::FilteredKeywords(items))
        }
    }
}

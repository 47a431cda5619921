//! Content fingerprinting for index memoization.
//!
//! The index cache is keyed by a hash of the normalized dataset content, not
//! by file name: renaming a file must not reuse a stale index, and reloading
//! identical content must not trigger a rebuild.

use crate::types::Document;
use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint over normalized documents.
///
/// Order-sensitive: the same rows in a different order are a different
/// dataset (row order participates in retrieval tie-breaking).
pub fn dataset_fingerprint(documents: &[Document]) -> String {
    let mut hasher = Sha256::new();
    for doc in documents {
        hasher.update(doc.id.as_bytes());
        hasher.update([0x1f]);
        hasher.update(doc.text.as_bytes());
        hasher.update([0x1e]);
    }
    format!("{:x}", hasher.finalize())
}

// src/pipeline/digest.rs

//! Content change detection.
//!
//! Digest equality is the sole criterion for "unchanged". Any byte-level
//! difference in the raw text counts as a change, whitespace included.

use sha2::{Digest, Sha256};

/// Compute a deterministic, order-sensitive digest of the raw text.
pub fn content_digest(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

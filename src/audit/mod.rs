//! Run fingerprints for logs
//!
//! Document text never goes to the logs; a SHA-256 fingerprint identifies it
//! instead, so repeated analyses of the same document can be correlated.

use sha2::{Digest, Sha256};

/// Hex SHA-256 of the document text
pub fn document_fingerprint(document_text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(document_text.as_bytes());
    hex::encode(hasher.finalize())
}

/// First 12 hex characters, enough to correlate log lines
pub fn short_fingerprint(document_text: &str) -> String {
    document_fingerprint(document_text)[..12].to_string()
}

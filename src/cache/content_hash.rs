use blake3::Hasher;
use serde::{Deserialize, Serialize};
use std::fmt;

/// BLAKE3 fingerprint of an upload's raw bytes, rendered `blake3:<hex>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentHash(String);

impl ContentHash {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compute the content hash of raw upload bytes.
pub fn content_hash(bytes: &[u8]) -> ContentHash {
    let mut hasher = Hasher::new();
    hasher.update(bytes);
    ContentHash(format!("blake3:{}", hasher.finalize().to_hex()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic_for_identical_bytes() {
        let first = content_hash(b"quarterly report");
        let second = content_hash(b"quarterly report");
        assert_eq!(first, second);
        assert!(first.as_str().starts_with("blake3:"));
        assert_eq!(first.as_str().len(), "blake3:".len() + 64);
    }

    #[test]
    fn hash_changes_when_bytes_change() {
        assert_ne!(content_hash(b"June 15, 2024"), content_hash(b"June 16, 2024"));
    }

    #[test]
    fn empty_input_hashes_to_blake3_of_nothing() {
        assert_eq!(
            content_hash(b"").as_str(),
            "blake3:af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262"
        );
    }

    #[test]
    fn serializes_as_plain_string() {
        let hash = content_hash(b"abc");
        assert_eq!(
            serde_json::to_value(&hash).expect("serialize hash"),
            serde_json::Value::String(hash.to_string())
        );
    }
}

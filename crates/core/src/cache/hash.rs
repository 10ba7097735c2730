//! Content-addressed cache key generation.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Fixed-length fingerprint of a query: lowercase hex SHA-256 of its exact text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compute the cache key for a search query.
///
/// The query is hashed byte-for-byte, so `"Rust"` and `"rust "` address
/// different records. The digest does not depend on process state and is
/// stable across restarts.
pub fn compute_cache_key(query: &str) -> CacheKey {
    let mut hasher = Sha256::new();
    hasher.update(query.as_bytes());
    CacheKey(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_stability() {
        let key1 = compute_cache_key("sourdough bread recipe");
        let key2 = compute_cache_key("sourdough bread recipe");
        assert_eq!(key1, key2);
    }

    #[test]
    fn test_hash_known_digest() {
        // sha256("abc")
        assert_eq!(
            compute_cache_key("abc").as_str(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_hash_different_queries() {
        assert_ne!(compute_cache_key("rust"), compute_cache_key("Rust"));
        assert_ne!(compute_cache_key("rust"), compute_cache_key("rust "));
    }

    #[test]
    fn test_hash_format() {
        let key = compute_cache_key("sourdough bread recipe");
        assert_eq!(key.as_str().len(), 64);
        assert!(key.as_str().chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(key.to_string(), key.as_str());
    }
}

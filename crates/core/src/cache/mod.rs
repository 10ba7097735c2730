//! File-backed cache for search responses.
//!
//! One JSON record per query fingerprint, stored as `<dir>/<key>.json`:
//!
//! - Keys are SHA-256 digests of the exact query text
//! - Freshness is checked at read time against a TTL (24h by default)
//! - Stale records are never evicted, only overwritten by the next save
//! - Every read failure is a miss, every write failure is logged and dropped
//! - Writes go through a temp file and a rename, so readers never see a torn record

pub mod hash;
pub mod store;

pub use crate::Error;

pub use hash::{CacheKey, compute_cache_key};
pub use store::{CacheEntry, CacheStore, SCHEMA_VERSION};

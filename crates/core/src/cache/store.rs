//! Search cache store operations.

use super::hash::{CacheKey, compute_cache_key};
use crate::Error;
use crate::model::SearchResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Version of the on-disk record layout. Records with any other version are misses.
pub const SCHEMA_VERSION: u32 = 1;

/// A cached search response and the request it answered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub version: u32,
    pub key: CacheKey,
    pub fetched_at: DateTime<Utc>,
    /// Result limit the payload was extracted with.
    pub limit: usize,
    /// Domain filter the payload was extracted with.
    #[serde(default)]
    pub filter_domain: Option<String>,
    pub payload: SearchResponse,
}

impl CacheEntry {
    pub fn new(
        key: CacheKey, payload: SearchResponse, fetched_at: DateTime<Utc>, limit: usize, filter_domain: Option<String>,
    ) -> Self {
        Self { version: SCHEMA_VERSION, key, fetched_at, limit, filter_domain, payload }
    }

    /// Whether this entry can answer a request for at most `limit` results
    /// under `filter_domain`.
    ///
    /// The filter must match exactly; the stored payload must fit within `limit`.
    pub fn answers(&self, limit: usize, filter_domain: Option<&str>) -> bool {
        self.filter_domain.as_deref() == filter_domain && self.payload.result_count() <= limit
    }
}

/// Why a lookup did not produce an entry.
#[derive(Debug, thiserror::Error)]
enum Miss {
    #[error("no record")]
    Absent,

    #[error("unreadable record: {0}")]
    Unreadable(std::io::Error),

    #[error("corrupt record: {0}")]
    Corrupt(serde_json::Error),

    #[error("unsupported record version {0}")]
    Version(u32),

    #[error("record belongs to key {0}")]
    KeyMismatch(CacheKey),

    #[error("stale record ({age_secs}s old)")]
    Stale { age_secs: u64 },
}

/// Cache store handle.
///
/// The directory is created lazily on the first save.
#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
    ttl: Duration,
}

impl CacheStore {
    /// Default freshness window (24 hours).
    pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

    /// Open a store rooted at `dir` with the default 24h TTL.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_ttl(dir, Self::DEFAULT_TTL)
    }

    pub fn with_ttl(dir: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self { dir: dir.into(), ttl }
    }

    /// Derive the cache key for a query.
    pub fn key_for(query: &str) -> CacheKey {
        compute_cache_key(query)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Path of the record addressed by `key`.
    pub fn path_for(&self, key: &CacheKey) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Load a fresh entry for `key`.
    ///
    /// Returns None if the record is missing, unreadable, corrupt, written by
    /// another schema version, or older than the TTL.
    pub async fn load(&self, key: &CacheKey) -> Option<CacheEntry> {
        self.load_at(key, Utc::now()).await
    }

    /// Load a fresh entry for `key`, judging freshness against `now`.
    pub async fn load_at(&self, key: &CacheKey, now: DateTime<Utc>) -> Option<CacheEntry> {
        match self.lookup(key, now).await {
            Ok(entry) => {
                tracing::debug!(%key, fetched_at = %entry.fetched_at, "search cache hit");
                Some(entry)
            }
            Err(Miss::Absent) => {
                tracing::debug!(%key, "search cache miss");
                None
            }
            Err(miss) => {
                tracing::debug!(%key, reason = %miss, "search cache miss");
                None
            }
        }
    }

    async fn lookup(&self, key: &CacheKey, now: DateTime<Utc>) -> Result<CacheEntry, Miss> {
        let bytes = match fs::read(self.path_for(key)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(Miss::Absent),
            Err(e) => return Err(Miss::Unreadable(e)),
        };

        let entry: CacheEntry = serde_json::from_slice(&bytes).map_err(Miss::Corrupt)?;

        if entry.version != SCHEMA_VERSION {
            return Err(Miss::Version(entry.version));
        }
        if &entry.key != key {
            return Err(Miss::KeyMismatch(entry.key));
        }

        // A timestamp from the future (clock skew) counts as age zero.
        if let Ok(age) = (now - entry.fetched_at).to_std()
            && age >= self.ttl
        {
            return Err(Miss::Stale { age_secs: age.as_secs() });
        }

        Ok(entry)
    }

    /// Write `entry` under `key`, replacing any previous record.
    ///
    /// Failures are logged and swallowed.
    pub async fn save(&self, key: &CacheKey, entry: &CacheEntry) {
        if let Err(e) = self.try_save(key, entry).await {
            tracing::warn!(%key, dir = %self.dir.display(), "failed to cache search result: {}", e);
        }
    }

    async fn try_save(&self, key: &CacheKey, entry: &CacheEntry) -> Result<(), Error> {
        fs::create_dir_all(&self.dir).await?;

        let json = serde_json::to_vec_pretty(entry)?;
        let path = self.path_for(key);
        let temp_path = self.dir.join(format!(".{key}.{}.tmp", Uuid::new_v4().simple()));

        let mut file = fs::File::create(&temp_path).await?;
        let written = match file.write_all(&json).await {
            Ok(()) => file.sync_all().await,
            Err(e) => Err(e),
        };
        drop(file);

        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        if let Err(e) = fs::rename(&temp_path, &path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        tracing::debug!(%key, path = %path.display(), "cached search result");
        Ok(())
    }
}

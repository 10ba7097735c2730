//! Cached Brave search.
//!
//! ### Flow
//! 1. Reject an empty query with an error envelope (no I/O)
//! 2. Serve a fresh cache record made with the same filter whose results fit the limit
//! 3. Otherwise fetch the result page with a fresh request profile
//! 4. Extract results, build the envelope, save it, return it
//!
//! Fetch failures become error envelopes and are never cached.

use std::sync::Arc;
use std::time::Instant;

use braveserp_core::{AppConfig, CacheEntry, CacheStore, SearchParameters, SearchResponse};
use chrono::Utc;

use crate::extract::extract_results;
use crate::fetch::{FetchConfig, FetchError, HttpFetcher, PageFetcher, search_url};
use crate::profile::ProfileGenerator;

/// Default number of results per search.
pub const DEFAULT_LIMIT: usize = 10;

/// A single search call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    /// Maximum number of results (default: 10)
    pub limit: usize,
    /// Keep only results whose link contains this text.
    pub filter_domain: Option<String>,
    /// Skip the cache lookup; the fresh result still replaces the record.
    pub force_refresh: bool,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self { query: query.into(), limit: DEFAULT_LIMIT, filter_domain: None, force_refresh: false }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_filter_domain(mut self, domain: impl Into<String>) -> Self {
        self.filter_domain = Some(domain.into());
        self
    }

    pub fn with_force_refresh(mut self, force: bool) -> Self {
        self.force_refresh = force;
        self
    }

    /// The domain filter, treating an empty string as no filter.
    fn filter(&self) -> Option<&str> {
        self.filter_domain.as_deref().filter(|d| !d.is_empty())
    }
}

/// Runs searches against the result page endpoint through the file cache.
#[derive(Clone)]
pub struct Searcher {
    fetcher: Arc<dyn PageFetcher>,
    cache: CacheStore,
    profiles: ProfileGenerator,
    base_url: String,
    gl: String,
    hl: String,
}

impl std::fmt::Debug for Searcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Searcher")
            .field("cache", &self.cache)
            .field("base_url", &self.base_url)
            .field("gl", &self.gl)
            .field("hl", &self.hl)
            .finish_non_exhaustive()
    }
}

impl Searcher {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>, cache: CacheStore, base_url: impl Into<String>, gl: impl Into<String>,
        hl: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            cache,
            profiles: ProfileGenerator::new(),
            base_url: base_url.into(),
            gl: gl.into(),
            hl: hl.into(),
        }
    }

    /// Build a searcher with an HTTP fetcher and cache from configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, FetchError> {
        let fetcher = HttpFetcher::new(FetchConfig::from(config))?;
        Ok(Self::new(
            Arc::new(fetcher),
            config.cache_store(),
            config.search_base_url.clone(),
            config.gl.clone(),
            config.hl.clone(),
        ))
    }

    /// Get reference to the cache store.
    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// Run a search. Never fails; problems are reported in the envelope.
    pub async fn search(&self, request: &SearchRequest) -> SearchResponse {
        let query = request.query.as_str();
        let filter = request.filter();

        if query.trim().is_empty() {
            let params = SearchParameters::new(query, &self.gl, &self.hl, Utc::now(), 0);
            return SearchResponse::error(params, "query must not be empty", "", "");
        }

        let key = CacheStore::key_for(query);

        if !request.force_refresh
            && let Some(entry) = self.cache.load(&key).await
        {
            if entry.answers(request.limit, filter) {
                return entry.payload;
            }
            tracing::debug!(%key, "cached record has a different filter or more results than the limit");
        }

        let profile = self.profiles.generate();
        let user_agent = profile.user_agent().to_string();
        let ip = profile.spoofed_ip().to_string();

        let start = Instant::now();
        let fetched = match search_url(&self.base_url, query) {
            Ok(url) => self.fetcher.fetch(&url, &profile).await.map_err(|e| e.to_string()),
            Err(e) => Err(format!("invalid search URL: {e}")),
        };
        let latency_ms = start.elapsed().as_millis() as u64;
        let fetched_at = Utc::now();
        let params = SearchParameters::new(query, &self.gl, &self.hl, fetched_at, latency_ms);

        let page = match fetched {
            Ok(page) => page,
            Err(message) => {
                tracing::warn!(query, %message, "search fetch failed");
                return SearchResponse::error(params, message, user_agent, ip);
            }
        };

        let results = extract_results(&page.text(), request.limit, filter);
        tracing::debug!(query, results = results.len(), latency_ms, "search completed");

        let response = SearchResponse::success(params, results, user_agent, ip);
        let entry = CacheEntry::new(
            key.clone(),
            response.clone(),
            fetched_at,
            request.limit,
            filter.map(str::to_string),
        );
        self.cache.save(&key, &entry).await;

        response
    }
}

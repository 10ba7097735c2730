//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (BRAVESERP_*)
//! 2. TOML config file (if BRAVESERP_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::cache::CacheStore;

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (BRAVESERP_*)
/// 2. TOML config file (if BRAVESERP_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding one JSON record per cached query.
    ///
    /// Set via BRAVESERP_CACHE_DIR environment variable.
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// Freshness window for cached responses, in seconds.
    ///
    /// Set via BRAVESERP_CACHE_TTL_SECS environment variable.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via BRAVESERP_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum number of redirects to follow.
    ///
    /// Set via BRAVESERP_MAX_REDIRECTS environment variable.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// Result page endpoint; the query is appended as `?q=`.
    ///
    /// Set via BRAVESERP_SEARCH_BASE_URL environment variable.
    #[serde(default = "default_search_base_url")]
    pub search_base_url: String,

    /// Geo location code reported in the envelope.
    ///
    /// Set via BRAVESERP_GL environment variable.
    #[serde(default = "default_gl")]
    pub gl: String,

    /// Host language code reported in the envelope.
    ///
    /// Set via BRAVESERP_HL environment variable.
    #[serde(default = "default_hl")]
    pub hl: String,

    /// Result limit used when a caller does not pass one.
    ///
    /// Set via BRAVESERP_DEFAULT_LIMIT environment variable.
    #[serde(default = "default_limit")]
    pub default_limit: usize,
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("./search_cache")
}

fn default_cache_ttl_secs() -> u64 {
    CacheStore::DEFAULT_TTL.as_secs()
}

fn default_timeout_ms() -> u64 {
    15_000
}

fn default_max_redirects() -> usize {
    10
}

fn default_search_base_url() -> String {
    "https://search.brave.com/search".into()
}

fn default_gl() -> String {
    "id".into()
}

fn default_hl() -> String {
    "id-id".into()
}

fn default_limit() -> usize {
    10
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            cache_ttl_secs: default_cache_ttl_secs(),
            timeout_ms: default_timeout_ms(),
            max_redirects: default_max_redirects(),
            search_base_url: default_search_base_url(),
            gl: default_gl(),
            hl: default_hl(),
            default_limit: default_limit(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Cache TTL as Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Build the cache store described by this configuration.
    pub fn cache_store(&self) -> CacheStore {
        CacheStore::with_ttl(self.cache_dir.clone(), self.cache_ttl())
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `BRAVESERP_`
    /// 2. TOML file from `BRAVESERP_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("BRAVESERP_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("BRAVESERP_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.cache_dir, PathBuf::from("./search_cache"));
        assert_eq!(config.cache_ttl_secs, 86_400);
        assert_eq!(config.timeout_ms, 15_000);
        assert_eq!(config.max_redirects, 10);
        assert_eq!(config.search_base_url, "https://search.brave.com/search");
        assert_eq!(config.gl, "id");
        assert_eq!(config.hl, "id-id");
        assert_eq!(config.default_limit, 10);
    }

    #[test]
    fn test_durations() {
        let config = AppConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(15));
        assert_eq!(config.cache_ttl(), Duration::from_secs(24 * 60 * 60));
    }

    #[test]
    fn test_cache_store_uses_config() {
        let config = AppConfig { cache_dir: "/tmp/serp".into(), cache_ttl_secs: 60, ..Default::default() };
        let store = config.cache_store();
        assert_eq!(store.dir(), std::path::Path::new("/tmp/serp"));
        assert_eq!(store.ttl(), Duration::from_secs(60));
    }

    #[test]
    fn test_load_from_env() {
        Jail::expect_with(|jail| {
            jail.set_env("BRAVESERP_CACHE_DIR", "/var/cache/serp");
            jail.set_env("BRAVESERP_TIMEOUT_MS", "5000");
            jail.set_env("BRAVESERP_GL", "us");

            let config = AppConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.cache_dir, PathBuf::from("/var/cache/serp"));
            assert_eq!(config.timeout_ms, 5000);
            assert_eq!(config.gl, "us");
            assert_eq!(config.hl, "id-id");
            Ok(())
        });
    }

    #[test]
    fn test_load_file_then_env() {
        Jail::expect_with(|jail| {
            jail.create_file("serp.toml", "hl = \"en-us\"\ndefault_limit = 5\ntimeout_ms = 9000\n")?;
            jail.set_env("BRAVESERP_CONFIG_FILE", "serp.toml");
            jail.set_env("BRAVESERP_TIMEOUT_MS", "3000");

            let config = AppConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.hl, "en-us");
            assert_eq!(config.default_limit, 5);
            assert_eq!(config.timeout_ms, 3000);
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        Jail::expect_with(|jail| {
            jail.set_env("BRAVESERP_TIMEOUT_MS", "10");
            assert!(matches!(AppConfig::load(), Err(ConfigError::Invalid { .. })));
            Ok(())
        });
    }
}

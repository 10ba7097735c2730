//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Thirty days.
const MAX_CACHE_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `cache_ttl_secs` is 0 or exceeds 30 days
    /// - `max_redirects` exceeds 20
    /// - `search_base_url` is not an http(s) URL
    /// - `default_limit` exceeds 100
    ///
    /// Returns `ConfigError::Missing` if `cache_dir`, `gl` or `hl` is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_dir.as_os_str().is_empty() {
            return Err(ConfigError::Missing {
                field: "cache_dir".into(),
                hint: "Set BRAVESERP_CACHE_DIR environment variable".into(),
            });
        }

        if self.cache_ttl_secs == 0 {
            return Err(ConfigError::Invalid { field: "cache_ttl_secs".into(), reason: "must be greater than 0".into() });
        }
        if self.cache_ttl_secs > MAX_CACHE_TTL_SECS {
            return Err(ConfigError::Invalid { field: "cache_ttl_secs".into(), reason: "must not exceed 30 days".into() });
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.max_redirects > 20 {
            return Err(ConfigError::Invalid { field: "max_redirects".into(), reason: "must not exceed 20".into() });
        }

        match url::Url::parse(&self.search_base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => {
                return Err(ConfigError::Invalid {
                    field: "search_base_url".into(),
                    reason: format!("unsupported scheme: {}", url.scheme()),
                });
            }
            Err(e) => {
                return Err(ConfigError::Invalid { field: "search_base_url".into(), reason: e.to_string() });
            }
        }

        if self.gl.is_empty() {
            return Err(ConfigError::Missing { field: "gl".into(), hint: "Set BRAVESERP_GL environment variable".into() });
        }
        if self.hl.is_empty() {
            return Err(ConfigError::Missing { field: "hl".into(), hint: "Set BRAVESERP_HL environment variable".into() });
        }

        if self.default_limit > 100 {
            return Err(ConfigError::Invalid { field: "default_limit".into(), reason: "must not exceed 100".into() });
        }
        if self.default_limit == 0 {
            tracing::warn!("default_limit is 0; searches without an explicit limit will return no results");
        }

        Ok(())
    }
}

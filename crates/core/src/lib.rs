//! Core types and shared functionality for braveserp.
//!
//! This crate provides:
//! - File-backed search cache with a freshness window
//! - The search response envelope and result records
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod model;

pub use cache::{CacheEntry, CacheKey, CacheStore};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use model::{Article, DebugInfo, SearchParameters, SearchResponse, SearchResult, SearchStatus};

//! Client code for braveserp.
//!
//! This crate provides the request profiles, HTTP fetch pipeline, result and
//! article extraction, and the cached search flow shared by the server and CLI.

pub mod extract;
pub mod fetch;
pub mod profile;
pub mod search;

pub use extract::{ARTICLE_USER_AGENT, extract_article, extract_results, normalize_whitespace, parse_article};
pub use fetch::{FetchConfig, FetchError, HttpFetcher, PageFetcher, RawPage, UrlError, canonicalize, search_url};
pub use profile::{ProfileGenerator, RequestProfile};
pub use search::{DEFAULT_LIMIT, SearchRequest, Searcher};

//! web_search tool implementation.
//!
//! Scrapes the Brave result page for a query, going through the file cache.

use braveserp_client::{SearchRequest, Searcher};
use braveserp_core::{AppConfig, Error};
use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;

/// Largest accepted `limit`.
pub const MAX_LIMIT: usize = 100;

/// Input parameters for web_search tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct WebSearchParams {
    /// Search query (required).
    pub query: String,

    /// Maximum number of results (0-100, default from configuration, normally 10).
    #[serde(default)]
    pub limit: Option<usize>,

    /// Keep only results whose link contains this text (e.g. "wikipedia.org").
    #[serde(default)]
    pub filter_domain: Option<String>,

    /// Force a refresh, bypassing the cache.
    #[serde(default)]
    pub force_refresh: bool,
}

/// Implementation of the web_search tool.
///
/// Fetch failures are reported inside the envelope (`"status": "error"`), not
/// as MCP errors.
pub async fn search_impl(
    searcher: &Searcher, config: &AppConfig, params: WebSearchParams,
) -> Result<CallToolResult, McpError> {
    if params.query.trim().is_empty() {
        return Err(Error::InvalidInput("query cannot be empty".into()).into());
    }

    let limit = params.limit.unwrap_or(config.default_limit);
    if limit > MAX_LIMIT {
        return Err(Error::InvalidInput(format!("limit must not exceed {MAX_LIMIT}")).into());
    }

    let mut request = SearchRequest::new(params.query).with_limit(limit).with_force_refresh(params.force_refresh);
    if let Some(domain) = params.filter_domain {
        request = request.with_filter_domain(domain);
    }

    let response = searcher.search(&request).await;
    tracing::info!(
        query = %request.query,
        status = ?response.status,
        results = response.result_count(),
        "web_search"
    );

    json_result(&response)
}

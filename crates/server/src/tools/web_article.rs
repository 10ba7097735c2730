//! web_article tool implementation.
//!
//! Fetches a page and returns its title and paragraph text.

use braveserp_client::{PageFetcher, extract_article};
use braveserp_core::Error;
use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;

/// Input parameters for web_article tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct WebArticleParams {
    /// The URL to fetch. A missing scheme defaults to https.
    pub url: String,
}

/// Implementation of the web_article tool.
pub async fn article_impl(fetcher: &dyn PageFetcher, params: WebArticleParams) -> Result<CallToolResult, McpError> {
    if params.url.trim().is_empty() {
        return Err(Error::InvalidInput("url cannot be empty".into()).into());
    }

    let article = extract_article(fetcher, &params.url)
        .await
        .inspect_err(|e| tracing::warn!(url = %params.url, error = %e, "web_article failed"))?;

    json_result(&article)
}

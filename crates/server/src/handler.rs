//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use std::sync::Arc;

use crate::tools::web_article::{WebArticleParams, article_impl};
use crate::tools::web_search::{WebSearchParams, search_impl};

use braveserp_client::{FetchConfig, FetchError, HttpFetcher, Searcher};
use braveserp_core::AppConfig;
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

/// The main MCP server handler for mcp-serp.
#[derive(Clone)]
pub struct McpSerpServer {
    config: Arc<AppConfig>,
    searcher: Arc<Searcher>,
    article_fetcher: Arc<HttpFetcher>,
    tool_router: ToolRouter<Self>,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl McpSerpServer {
    /// Create a new server handler from loaded configuration.
    pub fn new(config: AppConfig) -> Result<Self, FetchError> {
        let searcher = Searcher::from_config(&config)?;
        let article_fetcher = HttpFetcher::new(FetchConfig::from(&config))?;

        Ok(Self {
            config: Arc::new(config),
            searcher: Arc::new(searcher),
            article_fetcher: Arc::new(article_fetcher),
            tool_router: Self::tool_router(),
        })
    }

    /// Search the web through Brave's result page.
    ///
    /// Returns the JSON envelope; fetch failures come back as `"status": "error"`.
    #[tool(
        description = "Search the web via Brave. Returns a JSON envelope with organic results (position, title, link, snippet, domain, date). Results are cached for 24h per query."
    )]
    async fn web_search(&self, params: Parameters<WebSearchParams>) -> Result<CallToolResult, McpError> {
        search_impl(&self.searcher, &self.config, params.0).await
    }

    /// Fetch a page and extract its title and text.
    #[tool(description = "Fetch a web page and return its title, paragraph and heading text, source URL and domain.")]
    async fn web_article(&self, params: Parameters<WebArticleParams>) -> Result<CallToolResult, McpError> {
        article_impl(self.article_fetcher.as_ref(), params.0).await
    }
}

impl ServerHandler for McpSerpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "mcp-serp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}

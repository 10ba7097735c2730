//! MCP tool implementations.
//!
//! This module contains all tools exposed by the mcp-serp server.

pub mod web_article;
pub mod web_search;

use braveserp_core::Error;
use rmcp::{ErrorData as McpError, model::*};
use serde::Serialize;

/// Wrap a value as a single pretty-printed JSON text block.
pub(crate) fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| Error::Internal(format!("failed to serialize output: {e}")))?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

#[cfg(test)]
pub(crate) fn output_text(result: &CallToolResult) -> String {
    let content_val = serde_json::to_value(&result.content[0]).unwrap();
    content_val
        .get("text")
        .and_then(|v| v.as_str())
        .expect("Expected text field in content")
        .to_string()
}

//! Search response envelope and result records.
//!
//! Both outcomes of a search share one shape so callers never have to
//! branch on a thrown failure:
//!
//! ```json
//! {
//!   "status": "success" | "error",
//!   "message": "...",                 // error only
//!   "searchParameters": { "query", "engine", "gl", "hl", "type", "fetchedAt", "latencyMs" },
//!   "organic_results": [ { "position", "title", "link", "snippet", "domain", "date"? } ],
//!   "debug": { "user_agent", "ip", "result_count" }
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Search engine name reported in every envelope.
pub const ENGINE: &str = "brave";

/// Search type reported in every envelope.
pub const SEARCH_TYPE: &str = "search";

/// Outcome of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStatus {
    Success,
    Error,
}

/// Request metadata echoed back in the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParameters {
    pub query: String,
    pub engine: String,
    /// Geo location code.
    pub gl: String,
    /// Host language code.
    pub hl: String,
    #[serde(rename = "type")]
    pub search_type: String,
    #[serde(rename = "fetchedAt")]
    pub fetched_at: DateTime<Utc>,
    #[serde(rename = "latencyMs")]
    pub latency_ms: u64,
}

impl SearchParameters {
    pub fn new(
        query: impl Into<String>, gl: impl Into<String>, hl: impl Into<String>, fetched_at: DateTime<Utc>,
        latency_ms: u64,
    ) -> Self {
        Self {
            query: query.into(),
            engine: ENGINE.to_string(),
            gl: gl.into(),
            hl: hl.into(),
            search_type: SEARCH_TYPE.to_string(),
            fetched_at,
            latency_ms,
        }
    }
}

/// A single organic result extracted from a result page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// 1-indexed, contiguous in extraction order.
    pub position: usize,
    pub title: String,
    pub link: String,
    pub snippet: String,
    /// Host component of `link`.
    pub domain: String,
    /// Human-readable relative date ("2 days ago"), when the page shows one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Identity the request presented, plus the result count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugInfo {
    pub user_agent: String,
    pub ip: String,
    pub result_count: usize,
}

/// The success/error envelope returned by every search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub status: SearchStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(rename = "searchParameters")]
    pub search_parameters: SearchParameters,
    pub organic_results: Vec<SearchResult>,
    pub debug: DebugInfo,
}

impl SearchResponse {
    /// Build a success envelope. `debug.result_count` always matches `results`.
    pub fn success(
        parameters: SearchParameters, results: Vec<SearchResult>, user_agent: impl Into<String>, ip: impl Into<String>,
    ) -> Self {
        let result_count = results.len();
        Self {
            status: SearchStatus::Success,
            message: None,
            search_parameters: parameters,
            organic_results: results,
            debug: DebugInfo { user_agent: user_agent.into(), ip: ip.into(), result_count },
        }
    }

    /// Build an error envelope with no results.
    pub fn error(
        parameters: SearchParameters, message: impl Into<String>, user_agent: impl Into<String>, ip: impl Into<String>,
    ) -> Self {
        Self {
            status: SearchStatus::Error,
            message: Some(message.into()),
            search_parameters: parameters,
            organic_results: Vec::new(),
            debug: DebugInfo { user_agent: user_agent.into(), ip: ip.into(), result_count: 0 },
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == SearchStatus::Success
    }

    /// Get the number of results.
    pub fn result_count(&self) -> usize {
        self.organic_results.len()
    }
}

/// Title and main text of a single page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    /// Paragraph and heading text, one block per line.
    pub content: String,
    /// The URL that was requested.
    pub source: String,
    pub domain: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> SearchParameters {
        let fetched_at = DateTime::parse_from_rfc3339("2026-10-18T09:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        SearchParameters::new("sourdough bread recipe", "id", "id-id", fetched_at, 412)
    }

    fn result(position: usize, date: Option<&str>) -> SearchResult {
        SearchResult {
            position,
            title: "Classic Sourdough Bread".into(),
            link: "https://www.kingarthurbaking.com/recipes/sourdough-bread".into(),
            snippet: "A crusty, open-crumbed loaf made with nothing but flour, water and salt.".into(),
            domain: "www.kingarthurbaking.com".into(),
            date: date.map(str::to_string),
        }
    }

    #[test]
    fn test_success_envelope_shape() {
        let response = SearchResponse::success(
            params(),
            vec![result(1, Some("3 days ago")), result(2, None)],
            "Mozilla/5.0",
            "81.2.69.160",
        );
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["status"], "success");
        assert!(json.get("message").is_none());
        assert_eq!(json["searchParameters"]["engine"], "brave");
        assert_eq!(json["searchParameters"]["type"], "search");
        assert_eq!(json["searchParameters"]["gl"], "id");
        assert_eq!(json["searchParameters"]["hl"], "id-id");
        assert_eq!(json["searchParameters"]["latencyMs"], 412);
        assert_eq!(json["searchParameters"]["fetchedAt"], "2026-10-18T09:30:00Z");
        assert_eq!(json["organic_results"][0]["date"], "3 days ago");
        assert!(json["organic_results"][1].get("date").is_none());
        assert_eq!(json["debug"]["user_agent"], "Mozilla/5.0");
        assert_eq!(json["debug"]["ip"], "81.2.69.160");
        assert_eq!(json["debug"]["result_count"], 2);
    }

    #[test]
    fn test_error_envelope_shape() {
        let response = SearchResponse::error(params(), "request timed out", "Mozilla/5.0", "81.2.69.160");
        assert!(!response.is_success());
        assert_eq!(response.result_count(), 0);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "request timed out");
        assert_eq!(json["organic_results"], serde_json::json!([]));
        assert_eq!(json["debug"]["result_count"], 0);
    }

    #[test]
    fn test_envelope_reads_back_from_json() {
        let response = SearchResponse::success(params(), vec![result(1, None)], "ua", "1.1.1.1");
        let json = serde_json::to_string(&response).unwrap();
        let parsed: SearchResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, response);
    }
}

//! Organic result extraction from Brave result pages.
//!
//! ### Candidates
//! - `div.snippet`, `div.news-snippet`, `div.video-snippet`, `div.card`, in document order
//!
//! ### Per candidate
//! - Link: first `a[href]` whose href is absolute http(s)
//! - Title: `div.title` / `div.snippet-title`, else the link text (at least 5 chars)
//! - Snippet: `div.snippet-content` / `div.description` / `div.snippet-description`,
//!   else the candidate's full text (at least 30 chars)
//! - Date: `span.age` / `span.date` / `span.time` / `span.snippet-age`, when present
//!
//! A candidate that fails any check is skipped; the scan never aborts.
//! Repeated links are kept as separate results.

pub mod article;

pub use article::{ARTICLE_USER_AGENT, extract_article, parse_article};

use std::sync::LazyLock;

use braveserp_core::SearchResult;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Minimum title length in characters.
pub const MIN_TITLE_CHARS: usize = 5;

/// Minimum snippet length in characters.
pub const MIN_SNIPPET_CHARS: usize = 30;

static CANDIDATE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("div.snippet, div.news-snippet, div.video-snippet, div.card").expect("invalid selector")
});
static LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").expect("invalid selector"));
static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.title, div.snippet-title").expect("invalid selector"));
static SNIPPET: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("div.snippet-content, div.description, div.snippet-description").expect("invalid selector")
});
static DATE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("span.age, span.date, span.time, span.snippet-age").expect("invalid selector")
});

/// Why a candidate block was skipped.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
enum Rejection {
    #[error("no absolute http(s) link")]
    NoLink,

    #[error("link {0} does not contain filter domain")]
    Filtered(String),

    #[error("unparseable link {link}: {reason}")]
    BadLink { link: String, reason: String },

    #[error("link {0} has no host")]
    NoHost(String),

    #[error("title too short ({0} chars)")]
    ShortTitle(usize),

    #[error("snippet too short ({0} chars)")]
    ShortSnippet(usize),
}

/// Extract up to `limit` organic results from a result page.
///
/// `filter_domain`, when set and non-empty, keeps only results whose link
/// contains it. Positions run 1..=n over the accepted results.
pub fn extract_results(html: &str, limit: usize, filter_domain: Option<&str>) -> Vec<SearchResult> {
    let mut results = Vec::new();
    if limit == 0 {
        return results;
    }

    let document = Html::parse_document(html);
    let filter = filter_domain.filter(|d| !d.is_empty());

    for (index, candidate) in document.select(&CANDIDATE).enumerate() {
        match extract_candidate(candidate, filter, results.len() + 1) {
            Ok(result) => {
                results.push(result);
                if results.len() >= limit {
                    break;
                }
            }
            Err(rejection) => tracing::trace!(candidate = index, %rejection, "skipped result block"),
        }
    }

    tracing::debug!("extracted {} results", results.len());
    results
}

fn extract_candidate(
    candidate: ElementRef<'_>, filter: Option<&str>, position: usize,
) -> Result<SearchResult, Rejection> {
    let (link, anchor) = candidate
        .select(&LINK)
        .find_map(|a| {
            let href = a.value().attr("href")?.trim();
            (href.starts_with("http://") || href.starts_with("https://")).then(|| (href.to_string(), a))
        })
        .ok_or(Rejection::NoLink)?;

    if let Some(domain) = filter
        && !link.contains(domain)
    {
        return Err(Rejection::Filtered(link));
    }

    let parsed = Url::parse(&link).map_err(|e| Rejection::BadLink { link: link.clone(), reason: e.to_string() })?;
    let domain = match parsed.host_str() {
        Some(host) if !host.is_empty() => host.to_string(),
        _ => return Err(Rejection::NoHost(link)),
    };

    let title = match candidate.select(&TITLE).next() {
        Some(el) => element_text(el),
        None => element_text(anchor),
    };
    let title_chars = title.chars().count();
    if title_chars < MIN_TITLE_CHARS {
        return Err(Rejection::ShortTitle(title_chars));
    }

    let snippet = match candidate.select(&SNIPPET).next() {
        Some(el) => element_text(el),
        None => element_text(candidate),
    };
    let snippet_chars = snippet.chars().count();
    if snippet_chars < MIN_SNIPPET_CHARS {
        return Err(Rejection::ShortSnippet(snippet_chars));
    }

    let date = candidate
        .select(&DATE)
        .next()
        .map(element_text)
        .filter(|d| !d.is_empty());

    Ok(SearchResult { position, title, link, snippet, domain, date })
}

/// Text of an element with whitespace runs collapsed to single spaces.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    normalize_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

/// Collapse every whitespace run to a single space and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

//! URL construction and canonicalization.

use url::Url;

/// Error type for URL handling failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Canonicalize a page URL before fetching it.
///
/// Normalization steps:
/// 1. Trim leading/trailing whitespace
/// 2. Default scheme to https:// if missing
/// 3. Lowercase the host (done by the parser for http/https)
/// 4. Remove fragment (#...)
/// 5. Keep query string intact (do not reorder)
pub fn canonicalize(input: &str) -> Result<Url, UrlError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let mut parsed = if trimmed.contains("://") {
        parse_http(trimmed)?
    } else {
        parse_http(&format!("https://{trimmed}"))?
    };

    parsed.set_fragment(None);
    Ok(parsed)
}

/// Build the result page URL for `query` under `base`.
///
/// Any query string already on `base` is replaced by a single `q` parameter.
pub fn search_url(base: &str, query: &str) -> Result<Url, UrlError> {
    let mut url = parse_http(base)?;
    url.query_pairs_mut().clear().append_pair("q", query);
    Ok(url)
}

/// Host of `url` including a non-default port, as shown in a browser address bar.
pub fn display_host(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

fn parse_http(input: &str) -> Result<Url, UrlError> {
    let url = Url::parse(input).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(UrlError::UnsupportedScheme(scheme.to_string())),
    }
}

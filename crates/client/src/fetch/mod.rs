//! HTTP fetch of result pages and articles.
//!
//! ### Behaviour
//! - One GET per call, no retries
//! - Fixed timeout (default 15s) covering connect, headers and body
//! - Redirects followed up to a limit (default 10)
//! - Every header of the request profile is sent as-is
//! - Any non-2xx status is a failure
//!
//! ### URL handling
//! - `search_url` builds `<base>?q=<query>`
//! - `canonicalize` normalizes user-supplied page URLs

pub mod error;
pub mod url;

use async_trait::async_trait;
use braveserp_core::AppConfig;
use bytes::Bytes;
use reqwest::{Client, StatusCode, Url};
use std::time::{Duration, Instant};

use crate::profile::RequestProfile;

pub use error::FetchError;
pub use url::{UrlError, canonicalize, display_host, search_url};

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout (default: 15s)
    pub timeout: Duration,

    /// Maximum number of redirects to follow (default: 10)
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: Duration::from_secs(15), max_redirects: 10 }
    }
}

impl From<&AppConfig> for FetchConfig {
    fn from(config: &AppConfig) -> Self {
        Self { timeout: config.timeout(), max_redirects: config.max_redirects }
    }
}

/// A fetched page.
#[derive(Debug, Clone)]
pub struct RawPage {
    /// The URL requested
    pub url: Url,
    /// The final URL after redirects
    pub final_url: Url,
    /// HTTP status code (always 2xx)
    pub status: StatusCode,
    /// Response body bytes
    pub body: Bytes,
    /// Time taken to fetch in milliseconds
    pub fetch_ms: u64,
}

impl RawPage {
    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Fetches a single page with a given request profile.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &Url, profile: &RequestProfile) -> Result<RawPage, FetchError>;
}

/// reqwest-backed fetcher.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: Client,
    config: FetchConfig,
}

impl HttpFetcher {
    /// Create a new fetcher with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| FetchError::Client(e.into()))?;

        Ok(Self { http, config })
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url, profile: &RequestProfile) -> Result<RawPage, FetchError> {
        let start = Instant::now();
        let timeout = self.config.timeout;

        let mut request = self.http.get(url.clone());
        for (name, value) in profile.headers() {
            request = request.header(name, value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::from_send(url.as_str(), timeout, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: url.to_string(), status: status.as_u16() });
        }

        let final_url = response.url().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::from_body(url.as_str(), timeout, e))?;

        let fetch_ms = start.elapsed().as_millis() as u64;

        tracing::debug!("fetched {} -> {} in {}ms ({} bytes)", url, final_url, fetch_ms, body.len());

        Ok(RawPage { url: url.clone(), final_url, status, body, fetch_ms })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ProfileGenerator;
    use mockito::Matcher;

    fn fetcher(timeout: Duration) -> HttpFetcher {
        HttpFetcher::new(FetchConfig { timeout, ..Default::default() }).unwrap()
    }

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(15));
        assert_eq!(config.max_redirects, 10);
    }

    #[test]
    fn test_fetch_config_from_app_config() {
        let app = AppConfig { timeout_ms: 2500, max_redirects: 3, ..Default::default() };
        let config = FetchConfig::from(&app);
        assert_eq!(config.timeout, Duration::from_millis(2500));
        assert_eq!(config.max_redirects, 3);
    }

    #[tokio::test]
    async fn test_fetch_sends_profile_headers() {
        let mut server = mockito::Server::new_async().await;
        let profile = ProfileGenerator::new().generate();

        let mock = server
            .mock("GET", "/search")
            .match_query(Matcher::UrlEncoded("q".into(), "sourdough bread recipe".into()))
            .match_header("user-agent", profile.user_agent())
            .match_header("x-forwarded-for", profile.spoofed_ip())
            .match_header("accept-language", "en-US,en;q=0.9,id-ID;q=0.8")
            .with_status(200)
            .with_header("content-type", "text/html; charset=utf-8")
            .with_body("<html><body>ok</body></html>")
            .create_async()
            .await;

        let url = search_url(&format!("{}/search", server.url()), "sourdough bread recipe").unwrap();
        let page = fetcher(Duration::from_secs(5)).fetch(&url, &profile).await.unwrap();

        mock.assert_async().await;
        assert_eq!(page.status, StatusCode::OK);
        assert_eq!(page.text(), "<html><body>ok</body></html>");
        assert_eq!(page.url, url);
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(429)
            .with_body("slow down")
            .create_async()
            .await;

        let url = search_url(&format!("{}/search", server.url()), "rust").unwrap();
        let err = fetcher(Duration::from_secs(5))
            .fetch(&url, &RequestProfile::fixed("test-agent"))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Status { status: 429, .. }));
    }

    #[tokio::test]
    async fn test_fetch_follows_redirects() {
        let mut server = mockito::Server::new_async().await;
        let _redirect = server
            .mock("GET", "/old")
            .with_status(301)
            .with_header("location", "/new")
            .create_async()
            .await;
        let _target = server
            .mock("GET", "/new")
            .with_status(200)
            .with_body("moved here")
            .create_async()
            .await;

        let url = Url::parse(&format!("{}/old", server.url())).unwrap();
        let page = fetcher(Duration::from_secs(5))
            .fetch(&url, &RequestProfile::fixed("test-agent"))
            .await
            .unwrap();

        assert_eq!(page.final_url.path(), "/new");
        assert_eq!(page.text(), "moved here");
    }

    #[tokio::test]
    async fn test_fetch_timeout() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hold = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
            drop(socket);
        });

        let url = Url::parse(&format!("http://{addr}/search?q=rust")).unwrap();
        let err = fetcher(Duration::from_millis(200))
            .fetch(&url, &RequestProfile::fixed("test-agent"))
            .await
            .unwrap_err();

        assert!(err.is_timeout(), "expected timeout, got {err}");
        hold.abort();
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = Url::parse(&format!("http://{addr}/search?q=rust")).unwrap();
        let err = fetcher(Duration::from_secs(5))
            .fetch(&url, &RequestProfile::fixed("test-agent"))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Network { .. }));
    }
}

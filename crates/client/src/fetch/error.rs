//! Fetch failure type.

use braveserp_core::Error;
use std::sync::Arc;
use std::time::Duration;

/// The single failure condition of a fetch, carrying its cause.
///
/// A failed attempt is terminal; nothing retries.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    /// The request did not complete within the timeout.
    #[error("request to {url} timed out after {}ms", .timeout.as_millis())]
    Timeout { url: String, timeout: Duration },

    /// Connection, DNS, TLS, or redirect failure.
    #[error("network error requesting {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: Arc<reqwest::Error>,
    },

    /// The server answered with a non-2xx status.
    #[error("HTTP error {status} from {url}")]
    Status { url: String, status: u16 },

    /// The response body could not be read.
    #[error("failed to read response from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: Arc<reqwest::Error>,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(Arc<reqwest::Error>),
}

impl FetchError {
    /// Classify a reqwest send error.
    pub(crate) fn from_send(url: &str, timeout: Duration, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout { url: url.to_string(), timeout }
        } else {
            FetchError::Network { url: url.to_string(), source: Arc::new(err) }
        }
    }

    /// Classify a reqwest body read error.
    pub(crate) fn from_body(url: &str, timeout: Duration, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout { url: url.to_string(), timeout }
        } else {
            FetchError::Body { url: url.to_string(), source: Arc::new(err) }
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Timeout { .. })
    }
}

impl From<FetchError> for Error {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Timeout { .. } => Error::FetchTimeout(err.to_string()),
            FetchError::Status { .. } => Error::HttpError(err.to_string()),
            FetchError::Network { .. } | FetchError::Body { .. } | FetchError::Client(_) => {
                Error::FetchFailed(err.to_string())
            }
        }
    }
}

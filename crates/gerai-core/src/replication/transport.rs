//! Transport seam for replication
//!
//! `Transport` is the only capability the replication client needs: push
//! bytes at a URL and say whether that raised a transport fault. The HTTP
//! implementation ignores the response entirely.

use std::future::Future;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use thiserror::Error;
use tracing::debug;

/// Transport-level faults
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Invalid sink URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Unsupported sink URL scheme '{0}' (use http or https)")]
    UnsupportedScheme(String),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("Could not connect: {0}")]
    Connect(String),

    #[error("Request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_connect() {
            TransportError::Connect(error.to_string())
        } else {
            TransportError::Request(error.to_string())
        }
    }
}

/// One-way, response-blind delivery of a request body
pub trait Transport: Send + Sync {
    /// Send `body` to `url`; `Ok` only means no transport fault occurred
    fn transmit(
        &self,
        url: &str,
        body: Vec<u8>,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;
}

/// HTTP POST transport backed by reqwest
///
/// Follows redirects, sends `Content-Type: application/json`, never reads
/// the response body and ignores the status code.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpTransport {
    /// Create a transport whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("gerai/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Request(e.to_string()))?;
        Ok(Self { client, timeout })
    }
}

impl Transport for HttpTransport {
    async fn transmit(&self, url: &str, body: Vec<u8>) -> Result<(), TransportError> {
        let url = parse_sink_url(url)?;

        debug!("Posting {} bytes to {}", body.len(), url);
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout(self.timeout)
                } else {
                    TransportError::from(e)
                }
            })?;

        // The status says nothing reliable about the sink; keep it for diagnostics only
        debug!("Sink answered with status {}", response.status());
        Ok(())
    }
}

/// Parse and check a sink URL
pub fn parse_sink_url(raw: &str) -> Result<Url, TransportError> {
    let url = Url::parse(raw.trim()).map_err(|e| TransportError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(TransportError::UnsupportedScheme(other.to_string())),
    }
}

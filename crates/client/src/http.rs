//! Plain HTTP-JSON retrieval over [`reqwest`].

use async_trait::async_trait;
use serde_json::Value;

/// Errors from HTTP-JSON retrieval.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server returned a non-2xx status code.
    #[error("HTTP error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// GET `url` and decode the response body as JSON.
///
/// Non-2xx responses become [`HttpError::Status`] carrying the status
/// and body text.
pub async fn get_json(client: &reqwest::Client, url: &str) -> Result<Value, HttpError> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(HttpError::Status {
            status: status.as_u16(),
            body,
        });
    }

    Ok(response.json::<Value>().await?)
}

/// The JSON-fetching seam.
///
/// Production code uses [`HttpJsonFetcher`] (or [`crate::Cached`] around
/// it); tests substitute canned fixtures.
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<Value, HttpError>;
}

/// [`JsonFetcher`] backed by a plain `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct HttpJsonFetcher {
    client: reqwest::Client,
}

impl HttpJsonFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuse an existing `reqwest::Client` (connection pooling).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl JsonFetcher for HttpJsonFetcher {
    async fn get_json(&self, url: &str) -> Result<Value, HttpError> {
        get_json(&self.client, url).await
    }
}

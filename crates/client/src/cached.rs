//! URL-memoized JSON retrieval.
//!
//! [`Cached`] wraps any [`JsonFetcher`] with a per-URL response cache:
//! the first fetch of a URL stores the decoded body, repeats return the
//! stored value without touching the inner fetcher.

use async_trait::async_trait;
use prodev_core::cache::ResponseCache;
use serde_json::Value;

use crate::http::{HttpError, HttpJsonFetcher, JsonFetcher};

/// A memoizing wrapper around a [`JsonFetcher`].
///
/// Cached entries never expire; this is intended for immutable or
/// run-scoped lookups, not long-lived daemons.
#[derive(Debug, Default)]
pub struct Cached<F> {
    inner: F,
    cache: ResponseCache<String, Value>,
}

/// The common production shape: a memoized `reqwest`-backed fetcher.
pub type CachedJsonClient = Cached<HttpJsonFetcher>;

impl<F> Cached<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            cache: ResponseCache::new(),
        }
    }

    /// Number of memoized responses.
    pub async fn cached_responses(&self) -> usize {
        self.cache.len().await
    }

    /// Drop all memoized responses.
    pub async fn clear(&self) {
        self.cache.clear().await;
    }
}

impl<F: JsonFetcher> Cached<F> {
    /// GET with per-URL memoization.
    ///
    /// Only successful fetches are stored; an error leaves the cache
    /// unchanged so the next call retries.
    pub async fn get_json(&self, url: &str) -> Result<Value, HttpError> {
        if let Some(hit) = self.cache.get(url).await {
            tracing::debug!(%url, "response cache hit");
            return Ok(hit);
        }

        tracing::debug!(%url, "response cache miss");
        let value = self.inner.get_json(url).await?;
        self.cache.insert(url.to_string(), value.clone()).await;
        Ok(value)
    }
}

#[async_trait]
impl<F: JsonFetcher> JsonFetcher for Cached<F> {
    async fn get_json(&self, url: &str) -> Result<Value, HttpError> {
        Cached::get_json(self, url).await
    }
}

//! Cached HTTP fetching
//!
//! Every outbound request flows through [`CachedFetcher`], which consults the
//! [`CacheStore`] before touching the network. A URL is fetched at most once
//! per lifetime of the on-disk cache; the body is written through to disk
//! before the call returns.

use reqwest::Client;
use thiserror::Error;

use super::store::{CacheError, CacheStore};

/// Errors that can occur when fetching through the cache
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The fetched body could not be persisted to the cache file
    #[error("failed to persist cache: {0}")]
    CacheWrite(#[from] CacheError),
}

/// Abstraction over the HTTP transport
///
/// Production code uses [`HttpTransport`]; tests substitute mock transports
/// to exercise the cache path without network access.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Performs a GET against `url` and returns the raw response body
    async fn get(&self, url: &str) -> Result<String, FetchError>;
}

/// Transport that performs real HTTP GETs with reqwest
///
/// The response body is consumed as raw text regardless of content type.
/// There is no status-code handling, no retry, and no timeout: the caller
/// receives whatever the transport returns.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport with a default reqwest client
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;
        Ok(response.text().await?)
    }
}

/// Fetcher that deduplicates requests against a [`CacheStore`]
///
/// The fetcher is stateless; the store is borrowed for each call, so a
/// single process-wide store can be threaded through every component that
/// fetches.
#[derive(Debug, Clone)]
pub struct CachedFetcher<T = HttpTransport> {
    transport: T,
}

impl CachedFetcher<HttpTransport> {
    /// Creates a fetcher backed by a real HTTP transport
    pub fn new() -> Self {
        Self {
            transport: HttpTransport::new(),
        }
    }
}

impl Default for CachedFetcher<HttpTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> CachedFetcher<T> {
    /// Creates a fetcher with a custom transport
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    /// Returns the body for `url`, fetching it at most once
    ///
    /// On a cache hit the stored body is returned with no network activity
    /// and no disk write. On a miss the transport is invoked, the body is
    /// inserted into the store, and the whole store is saved to disk before
    /// this call returns — so a crash after `fetch` never loses the entry.
    ///
    /// A transport failure propagates unchanged and leaves the store
    /// unmodified. A save failure propagates as [`FetchError::CacheWrite`].
    ///
    /// Cache identity is the exact URL string. Every call site issues plain
    /// GETs with no custom headers; a call site that needs more than that
    /// must extend the key scheme deliberately.
    pub async fn fetch(&self, url: &str, store: &mut CacheStore) -> Result<String, FetchError> {
        if let Some(body) = store.get(url) {
            println!("Using cache");
            return Ok(body.to_string());
        }

        println!("Fetching");
        let body = self.transport.get(url).await?;
        store.insert(url, body.clone());
        store.save()?;
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tempfile::TempDir;

    /// Transport that returns a fixed body and counts its invocations
    struct MockTransport {
        body: String,
        calls: Cell<usize>,
    }

    impl MockTransport {
        fn new(body: &str) -> Self {
            Self {
                body: body.to_string(),
                calls: Cell::new(0),
            }
        }
    }

    impl Transport for MockTransport {
        async fn get(&self, _url: &str) -> Result<String, FetchError> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.body.clone())
        }
    }

    /// Transport that fails every request with a real reqwest error
    struct FailingTransport;

    impl Transport for FailingTransport {
        async fn get(&self, _url: &str) -> Result<String, FetchError> {
            // An invalid URL makes reqwest fail in the builder, before any
            // network activity
            let err = Client::new()
                .get("not a url")
                .send()
                .await
                .expect_err("request for an invalid URL must fail");
            Err(err.into())
        }
    }

    fn open_store(dir: &TempDir) -> CacheStore {
        CacheStore::open(dir.path().join("sites.json"))
    }

    #[tokio::test]
    async fn test_miss_fetches_and_returns_body() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let mut store = open_store(&dir);
        let fetcher = CachedFetcher::with_transport(MockTransport::new("BODY_A"));

        let body = fetcher
            .fetch("https://example.org/a", &mut store)
            .await
            .expect("Fetch should succeed");

        assert_eq!(body, "BODY_A");
        assert_eq!(store.get("https://example.org/a"), Some("BODY_A"));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_hit_serves_from_store_without_transport() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let mut store = open_store(&dir);

        let first = CachedFetcher::with_transport(MockTransport::new("BODY_A"));
        first
            .fetch("https://example.org/a", &mut store)
            .await
            .expect("First fetch should succeed");

        // A transport that would return something else must not be consulted
        let second = CachedFetcher::with_transport(MockTransport::new("OTHER"));
        let body = second
            .fetch("https://example.org/a", &mut store)
            .await
            .expect("Second fetch should succeed");

        assert_eq!(body, "BODY_A");
        assert_eq!(second.transport.calls.get(), 0, "Hit must not touch the transport");
        assert_eq!(store.len(), 1, "Hit must not grow the store");
    }

    #[tokio::test]
    async fn test_repeated_fetches_invoke_transport_once() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let mut store = open_store(&dir);
        let fetcher = CachedFetcher::with_transport(MockTransport::new("BODY_A"));

        for _ in 0..3 {
            let body = fetcher
                .fetch("https://example.org/a", &mut store)
                .await
                .expect("Fetch should succeed");
            assert_eq!(body, "BODY_A");
        }

        assert_eq!(fetcher.transport.calls.get(), 1);
    }

    #[tokio::test]
    async fn test_distinct_keys_fetch_separately() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let mut store = open_store(&dir);
        let fetcher = CachedFetcher::with_transport(MockTransport::new("BODY"));

        fetcher
            .fetch("https://example.org/a", &mut store)
            .await
            .expect("Fetch should succeed");
        fetcher
            .fetch("https://example.org/a/", &mut store)
            .await
            .expect("Fetch should succeed");

        assert_eq!(fetcher.transport.calls.get(), 2, "Trailing slash is a distinct key");
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_miss_writes_through_before_returning() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = dir.path().join("sites.json");
        let mut store = CacheStore::open(&path);
        let fetcher = CachedFetcher::with_transport(MockTransport::new("BODY_A"));

        fetcher
            .fetch("https://example.org/a", &mut store)
            .await
            .expect("Fetch should succeed");

        // A fresh load (simulating a new process) already sees the entry
        let reloaded = CacheStore::open(&path);
        assert_eq!(reloaded.get("https://example.org/a"), Some("BODY_A"));
    }

    #[tokio::test]
    async fn test_transport_failure_leaves_store_unmodified() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = dir.path().join("sites.json");
        let mut store = CacheStore::open(&path);
        let fetcher = CachedFetcher::with_transport(FailingTransport);

        let result = fetcher.fetch("https://example.org/a", &mut store).await;

        assert!(matches!(result, Err(FetchError::RequestFailed(_))));
        assert!(!store.contains("https://example.org/a"));
        assert!(!path.exists(), "No partial entry may be persisted");
    }
}

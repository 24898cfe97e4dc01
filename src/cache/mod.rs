//! Caching layer for network responses
//!
//! This module owns the single process-wide cache: a disk-backed mapping
//! from request URL to raw response body, plus the fetcher that consults it
//! before every network call. Entries never expire; deleting the backing
//! file is the only invalidation.

mod fetch;
mod store;

pub use fetch::{CachedFetcher, FetchError, HttpTransport, Transport};
pub use store::{CacheError, CacheStore};

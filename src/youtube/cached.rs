//! Cached YouTube API access
//!
//! This module provides a caching wrapper for `YouTubeApi` implementations that
//! stores every fetched response body verbatim and serves it on later runs.

use super::{Endpoint, YouTubeApi, YouTubeApiError};
use crate::cache::{BlobStore, CacheKey};
use tracing::{debug, info, warn};

/// A caching wrapper for YouTube API sources
///
/// On a miss the wrapped API is called once, the body is written to the store
/// and then read back from it, so a run always parses what later runs will
/// see. Cached entries are never refreshed.
pub(crate) struct CachedFetcher<A, S>
where
    A: YouTubeApi,
    S: BlobStore,
{
    /// The underlying API source
    api: A,
    /// Store for raw response bodies
    cache: S,
}

impl<A, S> CachedFetcher<A, S>
where
    A: YouTubeApi,
    S: BlobStore,
{
    /// Creates a new cached fetcher wrapping the given API source
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let client = YouTubeClient::new(api_key);
    /// let cache = CacheStorage::open(&std::env::temp_dir())?;
    /// let fetcher = CachedFetcher::new(client, cache);
    /// ```
    pub fn new(api: A, cache: S) -> Self {
        Self { api, cache }
    }

    /// Returns true if a response for this lookup is already cached
    pub fn is_cached(&self, endpoint: Endpoint, id: &str) -> bool {
        self.cache.exists(&Self::cache_key(endpoint, id))
    }

    /// Maps an endpoint lookup to its cache key
    fn cache_key(endpoint: Endpoint, id: &str) -> CacheKey {
        match endpoint {
            Endpoint::PlaylistItems => CacheKey::Playlist(id.to_string()),
            Endpoint::Videos => CacheKey::Video(id.to_string()),
        }
    }

    #[cfg(test)]
    pub(crate) fn cache(&self) -> &S {
        &self.cache
    }

    #[cfg(test)]
    pub(crate) fn api(&self) -> &A {
        &self.api
    }
}

impl<A, S> YouTubeApi for CachedFetcher<A, S>
where
    A: YouTubeApi,
    S: BlobStore,
{
    fn fetch(&self, endpoint: Endpoint, id: &str) -> Result<Vec<u8>, YouTubeApiError> {
        let key = Self::cache_key(endpoint, id);

        // Body fetched during this call, if any
        let mut fresh = None;

        if self.cache.exists(&key) {
            debug!(%endpoint, id, "Cache hit");
        } else {
            info!(%endpoint, id, "Cache miss, fetching from YouTube");
            let body = self.api.fetch(endpoint, id)?;

            if let Err(e) = self.cache.write(&key, &body) {
                warn!(%endpoint, id, error = %e, "Unable to write cache entry");
            }

            fresh = Some(body);
        }

        match self.cache.read(&key) {
            Ok(body) => Ok(body),
            Err(e) => match fresh {
                Some(body) => {
                    warn!(%endpoint, id, error = %e, "Unable to read cache entry, using fetched response");
                    Ok(body)
                }
                None => Err(e.into()),
            },
        }
    }
}

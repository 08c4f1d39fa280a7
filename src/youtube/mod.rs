/// Access to the YouTube Data API (v3).
///
/// This module provides the endpoint definitions, the error type shared by all
/// API-facing code, and the `YouTubeApi` trait implemented by the HTTP client
/// and by its caching wrapper.
mod cached;
mod client;
mod response;

pub(crate) use cached::CachedFetcher;
pub(crate) use client::YouTubeClient;
pub(crate) use response::{PlaylistItem, VideoItem, parse_playlist_items, parse_videos};

use crate::cache::CacheError;
use std::fmt;
use thiserror::Error;

/// Errors that can occur while retrieving data from YouTube.
#[derive(Debug, Error)]
pub enum YouTubeApiError {
    /// The request could not be built, sent, or its body read
    #[error("Request failed: {0}")]
    RequestError(String),

    /// The API answered with a non-success status
    #[error("API returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The response body is not the expected JSON envelope
    #[error("Failed to decode API response: {0}")]
    DecodeError(#[from] serde_json::Error),

    /// The response was valid but did not contain the requested resource
    #[error("Not found: {0}")]
    NotFound(String),

    /// Neither the cache nor a fresh fetch produced a body
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),
}

/// The two API endpoints the catalog reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Endpoint {
    /// `videos`, looked up by video id
    Videos,
    /// `playlistItems`, looked up by playlist id
    PlaylistItems,
}

/// Number of playlist items requested. Further pages are never fetched.
pub(crate) const PLAYLIST_PAGE_SIZE: &str = "15";

impl Endpoint {
    /// Path segment below `/youtube/v3/`
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Videos => "videos",
            Endpoint::PlaylistItems => "playlistItems",
        }
    }

    /// Query parameters for a lookup of `id`, in request order
    pub fn query<'a>(self, id: &'a str, api_key: &'a str) -> Vec<(&'static str, &'a str)> {
        match self {
            Endpoint::Videos => vec![("part", "snippet"), ("id", id), ("key", api_key)],
            Endpoint::PlaylistItems => vec![
                ("part", "id,snippet,contentDetails"),
                ("maxResults", PLAYLIST_PAGE_SIZE),
                ("playlistId", id),
                ("key", api_key),
            ],
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Trait for sources of raw YouTube API responses.
///
/// Implementors return the verbatim response body; decoding is left to the
/// functions in the `response` module so that cached and fresh bodies take the
/// same path.
pub(crate) trait YouTubeApi {
    /// Fetches the raw response body for `id` from `endpoint`.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Which endpoint to query
    /// * `id` - The playlist id or video id to look up
    ///
    /// # Returns
    ///
    /// The response body bytes, or a YouTubeApiError
    fn fetch(&self, endpoint: Endpoint, id: &str) -> Result<Vec<u8>, YouTubeApiError>;
}

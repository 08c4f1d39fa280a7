/// YouTube Data API response types and decoding.
///
/// These structures mirror the JSON envelopes returned by the `playlistItems`
/// and `videos` endpoints. Only the first page of a response is ever looked at.
use super::YouTubeApiError;
use crate::catalog::Thumbnail;
use serde::Deserialize;
use std::collections::HashMap;

/// The top-level response from the playlistItems endpoint.
#[derive(Debug, Deserialize)]
pub(super) struct PlaylistItemListResponse {
    /// Entries of the playlist in playlist order
    pub items: Vec<PlaylistItem>,
}

/// A single entry of a playlist.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlaylistItem {
    pub snippet: Snippet,
    pub content_details: ContentDetails,
}

/// Title, description and thumbnails attached to a video or playlist entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct Snippet {
    pub title: String,
    pub description: String,
    /// Thumbnails keyed by size name ("default", "medium", "high", ...).
    /// Deleted and private videos come without any.
    #[serde(default)]
    pub thumbnails: HashMap<String, Thumbnail>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ContentDetails {
    /// Id of the video the playlist entry points to
    pub video_id: String,
}

/// The top-level response from the videos endpoint.
#[derive(Debug, Deserialize)]
pub(super) struct VideoListResponse {
    pub items: Vec<VideoItem>,
}

/// A single video resource.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct VideoItem {
    pub id: String,
    pub snippet: Snippet,
}

/// Decodes a playlistItems response body into its entries, in source order.
///
/// # Errors
///
/// Returns `YouTubeApiError::DecodeError` if the body is not JSON or lacks the
/// `items` envelope, which is also what an API error payload looks like.
pub(crate) fn parse_playlist_items(data: &[u8]) -> Result<Vec<PlaylistItem>, YouTubeApiError> {
    let response: PlaylistItemListResponse = serde_json::from_slice(data)?;
    Ok(response.items)
}

/// Decodes a videos response body into its video resources.
pub(crate) fn parse_videos(data: &[u8]) -> Result<Vec<VideoItem>, YouTubeApiError> {
    let response: VideoListResponse = serde_json::from_slice(data)?;
    Ok(response.items)
}

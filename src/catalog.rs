//! Catalog building
//!
//! Turns decoded API entries into normalized video records filed under a
//! season and episode number.

use crate::youtube::{PlaylistItem, VideoItem};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Prefix of every canonical watch URL; the video id follows directly
pub const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";

/// Name of the thumbnail variant copied into the catalog
const THUMBNAIL_SIZE: &str = "default";

/// A thumbnail image
///
/// `Default` is the zero value (empty URL, zero dimensions) used when a video
/// has no thumbnail of the wanted size.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

/// Normalized metadata of a single video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    /// Upstream video id
    pub id: String,
    pub title: String,
    pub description: String,
    /// Canonical watch URL derived from the id
    pub url: String,
    pub thumbnail: Thumbnail,
}

/// A video filed under a season and episode number
///
/// Serialized flat: `{"season", "episode", "id", "title", ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    /// Season the video's playlist is assigned to
    pub season: usize,
    /// 1-based position within the playlist
    pub episode: usize,
    #[serde(flatten)]
    pub video: Video,
}

/// Returns the canonical watch URL for a video id
pub fn watch_url(video_id: &str) -> String {
    format!("{WATCH_URL_PREFIX}{video_id}")
}

/// Extracts the video id from a canonical watch URL
///
/// Additional query parameters after the id (`&t=42`) are ignored. Returns
/// `None` for anything that is not a watch URL with a non-empty id.
pub fn video_id_from_url(url: &str) -> Option<String> {
    let rest = url.strip_prefix(WATCH_URL_PREFIX)?;
    let id = rest.split('&').next().unwrap_or_default();

    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

/// Picks the catalog thumbnail, falling back to the zero value
fn pick_thumbnail(thumbnails: &HashMap<String, Thumbnail>) -> Thumbnail {
    thumbnails.get(THUMBNAIL_SIZE).cloned().unwrap_or_default()
}

/// Builds the catalog records of one playlist
///
/// Episodes are numbered 1..=N in the order the entries are given. The season
/// is whatever the caller assigned to the playlist. Never fails.
pub(crate) fn build_records(items: Vec<PlaylistItem>, season: usize) -> Vec<VideoRecord> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| VideoRecord {
            season,
            episode: index + 1,
            video: Video {
                url: watch_url(&item.content_details.video_id),
                thumbnail: pick_thumbnail(&item.snippet.thumbnails),
                id: item.content_details.video_id,
                title: item.snippet.title,
                description: item.snippet.description,
            },
        })
        .collect()
}

/// Normalizes a video resource from the videos endpoint
pub(crate) fn video_from_item(item: VideoItem) -> Video {
    Video {
        url: watch_url(&item.id),
        thumbnail: pick_thumbnail(&item.snippet.thumbnails),
        id: item.id,
        title: item.snippet.title,
        description: item.snippet.description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::playlist_body;
    use crate::youtube::{parse_playlist_items, parse_videos};

    fn items(entries: &[(&str, &str)]) -> Vec<PlaylistItem> {
        parse_playlist_items(&playlist_body(entries)).unwrap()
    }

    #[test]
    fn test_watch_url() {
        assert_eq!(watch_url("a"), "https://www.youtube.com/watch?v=a");
    }

    #[test]
    fn test_video_id_round_trip() {
        for id in ["a", "EjB1kz2tn5s", "-_x9"] {
            assert_eq!(video_id_from_url(&watch_url(id)).as_deref(), Some(id));
        }
    }

    #[test]
    fn test_video_id_from_url_rejects_other_urls() {
        assert_eq!(video_id_from_url("https://example.com/watch?v=a"), None);
        assert_eq!(video_id_from_url(WATCH_URL_PREFIX), None);
        assert_eq!(
            video_id_from_url("https://www.youtube.com/watch?v=a&t=42").as_deref(),
            Some("a")
        );
    }

    #[test]
    fn test_build_records_three_items() {
        let records = build_records(items(&[("a", "T1"), ("b", "T2"), ("c", "T3")]), 2);

        let summary: Vec<_> = records
            .iter()
            .map(|r| (r.season, r.episode, r.video.id.as_str(), r.video.title.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![(2, 1, "a", "T1"), (2, 2, "b", "T2"), (2, 3, "c", "T3")]
        );
        assert_eq!(records[0].video.url, "https://www.youtube.com/watch?v=a");
        assert_eq!(records[0].video.description, "About T1");
        assert_eq!(
            records[2].video.thumbnail,
            Thumbnail {
                url: "https://i.ytimg.com/vi/c/default.jpg".to_string(),
                width: 120,
                height: 90,
            }
        );
    }

    #[test]
    fn test_episodes_are_contiguous() {
        let entries: Vec<(String, String)> = (0..15)
            .map(|i| (format!("id{i}"), format!("Title {i}")))
            .collect();
        let borrowed: Vec<(&str, &str)> = entries
            .iter()
            .map(|(id, title)| (id.as_str(), title.as_str()))
            .collect();

        let records = build_records(items(&borrowed), 7);

        assert_eq!(records.len(), 15);
        let episodes: Vec<_> = records.iter().map(|r| r.episode).collect();
        assert_eq!(episodes, (1..=15).collect::<Vec<_>>());
        assert!(records.iter().all(|r| r.season == 7));
    }

    #[test]
    fn test_build_records_empty() {
        assert!(build_records(Vec::new(), 1).is_empty());
    }

    #[test]
    fn test_missing_default_thumbnail_yields_zero_value() {
        let body = br#"{"items": [
            {"snippet": {"title": "No thumbs", "description": ""}, "contentDetails": {"videoId": "x"}},
            {"snippet": {"title": "Only high", "description": "",
                "thumbnails": {"high": {"url": "h.jpg", "width": 480, "height": 360}}},
             "contentDetails": {"videoId": "y"}}
        ]}"#;

        let records = build_records(parse_playlist_items(body).unwrap(), 1);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].video.thumbnail, Thumbnail::default());
        assert_eq!(records[1].video.thumbnail, Thumbnail::default());
        assert_eq!(records[1].video.thumbnail.url, "");
    }

    #[test]
    fn test_record_serializes_flat() {
        let records = build_records(items(&[("a", "T1")]), 2);
        let value = serde_json::to_value(&records[0]).unwrap();

        assert_eq!(value["season"], 2);
        assert_eq!(value["episode"], 1);
        assert_eq!(value["id"], "a");
        assert_eq!(value["title"], "T1");
        assert_eq!(value["url"], "https://www.youtube.com/watch?v=a");
        assert_eq!(value["thumbnail"]["width"], 120);
        assert!(value.get("video").is_none());
    }

    #[test]
    fn test_video_from_item() {
        let body = br#"{"items": [{"id": "EjB1kz2tn5s", "snippet": {"title": "T", "description": "D"}}]}"#;
        let item = parse_videos(body).unwrap().remove(0);

        let video = video_from_item(item);

        assert_eq!(video.id, "EjB1kz2tn5s");
        assert_eq!(video.url, "https://www.youtube.com/watch?v=EjB1kz2tn5s");
        assert_eq!(video.thumbnail, Thumbnail::default());
    }
}

//! Playlist Catalog - Build a season/episode indexed video catalog from YouTube playlists
//!
//! This library fetches the entries of curated YouTube playlists, caches the raw
//! API responses locally and flattens everything into a single catalog where
//! each playlist is a season and each entry an episode.

mod cache;
mod catalog;
mod config;
mod output;
mod youtube;

#[cfg(test)]
mod testing;

use cache::{BlobStore, CacheStorage};
use youtube::{
    CachedFetcher, Endpoint, YouTubeApi, YouTubeClient, parse_playlist_items, parse_videos,
};

// Re-export error types
pub use cache::CacheError;
pub use config::ConfigError;
pub use output::OutputError;
pub use youtube::YouTubeApiError;

// Re-export catalog types
pub use catalog::{Thumbnail, Video, VideoRecord, WATCH_URL_PREFIX, video_id_from_url, watch_url};
pub use config::{
    API_KEY_VAR, ApiKey, Config, DEFAULT_OUTPUT_FILE, DEFAULT_PLAYLISTS, PlaylistSource,
    default_cache_dir, default_playlists,
};
pub use output::{CatalogReport, PlaylistFailure, ResultSet, persist};

use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Document written when the result set itself cannot be encoded
const EMPTY_DOCUMENT: &[u8] = b"{\"videos\":[]}";

/// Progress event emitted while building the catalog
///
/// These events allow library users to track progress and provide feedback
/// during a run.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Run started
    Started { playlist_count: usize },

    /// Loading the entries of a playlist, from the cache or the API
    LoadingPlaylist {
        index: usize,
        total: usize,
        season: usize,
        playlist_id: String,
        cached: bool,
    },

    /// A playlist was turned into catalog records
    PlaylistCataloged {
        season: usize,
        playlist_id: String,
        video_count: usize,
    },

    /// A playlist was skipped
    PlaylistFailed {
        season: usize,
        playlist_id: String,
        reason: String,
    },

    /// All playlists processed
    Complete {
        video_count: usize,
        failure_count: usize,
    },
}

/// Top-level error type for catalog operations
///
/// Only errors that stop a whole run end up here; a failing playlist is
/// reported through `CatalogReport::failures` instead.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Error during cache operations
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// Error talking to the YouTube API
    #[error("YouTube API error: {0}")]
    YouTube(#[from] YouTubeApiError),
}

/// Builds the catalog for every configured playlist
///
/// Playlists are processed one after another in configuration order. For each
/// one the cached `playlistItems` response is used if present; otherwise it is
/// fetched, cached and read back. A playlist that cannot be fetched or decoded
/// contributes no records and is listed in the report's failures; the run
/// carries on with the next playlist.
///
/// # Arguments
///
/// * `config` - Validated run configuration
/// * `progress_callback` - Closure called with progress events (can be empty for silent operation)
///
/// # Errors
///
/// Fails only if the cache directory cannot be opened.
///
/// # Examples
///
/// ```no_run
/// use playlist_catalog::{ApiKey, Config, build_catalog, default_cache_dir, default_playlists};
/// use std::path::PathBuf;
///
/// let config = Config::new(
///     ApiKey::from_env().unwrap(),
///     default_playlists(),
///     default_cache_dir(),
///     PathBuf::from("videos.json"),
/// )
/// .unwrap();
///
/// let report = build_catalog(&config, |_| {}).unwrap();
/// println!("{} videos", report.result_set.len());
/// ```
pub fn build_catalog<F>(config: &Config, progress_callback: F) -> Result<CatalogReport, CatalogError>
where
    F: FnMut(ProgressEvent),
{
    let cache = CacheStorage::open(&config.cache_dir)?;
    debug!(cache_dir = %cache.cache_dir().display(), "Using response cache");

    let client = YouTubeClient::new(config.api_key.clone());
    let fetcher = CachedFetcher::new(client, cache);

    Ok(catalog_playlists(
        &fetcher,
        &config.playlists,
        progress_callback,
    ))
}

/// Runs the per-playlist pipeline over all playlists, collecting failures
fn catalog_playlists<A, S, F>(
    fetcher: &CachedFetcher<A, S>,
    playlists: &[PlaylistSource],
    mut progress_callback: F,
) -> CatalogReport
where
    A: YouTubeApi,
    S: BlobStore,
    F: FnMut(ProgressEvent),
{
    progress_callback(ProgressEvent::Started {
        playlist_count: playlists.len(),
    });

    let mut report = CatalogReport::default();

    for (index, source) in playlists.iter().enumerate() {
        progress_callback(ProgressEvent::LoadingPlaylist {
            index,
            total: playlists.len(),
            season: source.season,
            playlist_id: source.playlist_id.clone(),
            cached: fetcher.is_cached(Endpoint::PlaylistItems, &source.playlist_id),
        });

        match catalog_playlist(fetcher, source) {
            Ok(records) => {
                info!(
                    season = source.season,
                    playlist_id = %source.playlist_id,
                    videos = records.len(),
                    "Playlist cataloged"
                );
                progress_callback(ProgressEvent::PlaylistCataloged {
                    season: source.season,
                    playlist_id: source.playlist_id.clone(),
                    video_count: records.len(),
                });
                report.result_set.extend(records);
            }
            Err(e) => {
                warn!(
                    season = source.season,
                    playlist_id = %source.playlist_id,
                    error = %e,
                    "Skipping playlist"
                );
                progress_callback(ProgressEvent::PlaylistFailed {
                    season: source.season,
                    playlist_id: source.playlist_id.clone(),
                    reason: e.to_string(),
                });
                report.failures.push(PlaylistFailure {
                    season: source.season,
                    playlist_id: source.playlist_id.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    progress_callback(ProgressEvent::Complete {
        video_count: report.result_set.len(),
        failure_count: report.failures.len(),
    });

    report
}

/// Fetches, decodes and catalogs a single playlist
fn catalog_playlist<A>(api: &A, source: &PlaylistSource) -> Result<Vec<VideoRecord>, YouTubeApiError>
where
    A: YouTubeApi,
{
    let body = api.fetch(Endpoint::PlaylistItems, &source.playlist_id)?;
    let items = parse_playlist_items(&body)?;
    Ok(catalog::build_records(items, source.season))
}

/// Serializes the result set and writes it to `destination`
///
/// Failures are logged and never abort: if encoding fails an empty catalog is
/// used, and if writing fails the document is still returned.
///
/// # Returns
///
/// The document that was (or should have been) written, for echoing to the user
pub fn write_catalog(result_set: &ResultSet, destination: &Path) -> Vec<u8> {
    let document = match result_set.to_json() {
        Ok(document) => document,
        Err(e) => {
            warn!(error = %e, "Unable to encode catalog, writing an empty one");
            EMPTY_DOCUMENT.to_vec()
        }
    };

    match persist(&document, destination) {
        Ok(()) => info!(path = %destination.display(), videos = result_set.len(), "Catalog written"),
        Err(e) => warn!(error = %e, "Unable to write catalog"),
    }

    document
}

/// Looks up a single video by id
///
/// The raw `videos` response is cached next to the playlist responses and
/// reused on later calls.
///
/// # Errors
///
/// Returns an error if the cache directory cannot be opened, the request or
/// decoding fails, or the API knows no video with this id.
pub fn lookup_video(
    api_key: &ApiKey,
    cache_dir: &Path,
    video_id: &str,
) -> Result<Video, CatalogError> {
    let cache = CacheStorage::open(cache_dir)?;
    let fetcher = CachedFetcher::new(YouTubeClient::new(api_key.clone()), cache);

    Ok(fetch_video(&fetcher, video_id)?)
}

fn fetch_video<A>(api: &A, video_id: &str) -> Result<Video, YouTubeApiError>
where
    A: YouTubeApi,
{
    let body = api.fetch(Endpoint::Videos, video_id)?;

    parse_videos(&body)?
        .into_iter()
        .next()
        .map(catalog::video_from_item)
        .ok_or_else(|| YouTubeApiError::NotFound(format!("video {video_id}")))
}

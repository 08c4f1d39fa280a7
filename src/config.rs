//! Run configuration
//!
//! Everything a catalog run needs is validated here, before any network or
//! cache component is constructed.

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Environment variable holding the YouTube Data API key
pub const API_KEY_VAR: &str = "YOUTUBE_API_KEY";

/// Default location of the aggregate catalog document
pub const DEFAULT_OUTPUT_FILE: &str = "videos.json";

/// Built-in playlist table as `(season, playlist id)` pairs, in processing order
pub const DEFAULT_PLAYLISTS: &[(usize, &str)] = &[(1, "ELPPAps9oEkaQ")];

/// Errors detected while validating the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The API key variable is unset or empty
    #[error("YOUTUBE_API_KEY environment variable is not set")]
    MissingApiKey,

    /// A playlist specification could not be parsed
    #[error("Invalid playlist '{0}', expected SEASON=PLAYLIST_ID")]
    InvalidPlaylist(String),

    /// Two playlists were assigned the same season
    #[error("Season {0} is assigned to more than one playlist")]
    DuplicateSeason(usize),

    /// No playlists to process
    #[error("No playlists configured")]
    NoPlaylists,
}

/// A validated, non-empty YouTube Data API key
///
/// The key is redacted from `Debug` output so it never ends up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Validates a key, rejecting empty or whitespace-only values
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(Self(key))
    }

    /// Reads the key from the `YOUTUBE_API_KEY` environment variable
    pub fn from_env() -> Result<Self, ConfigError> {
        let key = std::env::var(API_KEY_VAR).map_err(|_| ConfigError::MissingApiKey)?;
        Self::new(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// A playlist and the season number its videos are filed under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistSource {
    /// Season number assigned to every video of the playlist
    pub season: usize,
    /// Upstream playlist identifier
    pub playlist_id: String,
}

impl PlaylistSource {
    pub fn new(season: usize, playlist_id: impl Into<String>) -> Self {
        Self {
            season,
            playlist_id: playlist_id.into(),
        }
    }
}

/// Parses `SEASON=PLAYLIST_ID`, e.g. `2=PLrAXtmErZgOe`
impl FromStr for PlaylistSource {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidPlaylist(s.to_string());

        let (season, playlist_id) = s.split_once('=').ok_or_else(invalid)?;
        let season = season.trim().parse::<usize>().map_err(|_| invalid())?;
        let playlist_id = playlist_id.trim();

        if playlist_id.is_empty() {
            return Err(invalid());
        }

        Ok(Self::new(season, playlist_id))
    }
}

/// Returns the built-in playlist table
pub fn default_playlists() -> Vec<PlaylistSource> {
    DEFAULT_PLAYLISTS
        .iter()
        .map(|(season, id)| PlaylistSource::new(*season, *id))
        .collect()
}

/// Validated settings for a catalog run
#[derive(Debug, Clone)]
pub struct Config {
    /// Credential passed to every API request
    pub api_key: ApiKey,
    /// Playlists in processing order
    pub playlists: Vec<PlaylistSource>,
    /// Directory holding cached API responses
    pub cache_dir: PathBuf,
    /// Destination of the aggregate catalog document
    pub output_path: PathBuf,
}

impl Config {
    /// Builds a configuration, checking the playlist table
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoPlaylists` for an empty table and
    /// `ConfigError::DuplicateSeason` if a season appears twice, since season
    /// numbers must identify exactly one playlist.
    pub fn new(
        api_key: ApiKey,
        playlists: Vec<PlaylistSource>,
        cache_dir: PathBuf,
        output_path: PathBuf,
    ) -> Result<Self, ConfigError> {
        if playlists.is_empty() {
            return Err(ConfigError::NoPlaylists);
        }

        let mut seen = HashSet::new();
        for source in &playlists {
            if !seen.insert(source.season) {
                return Err(ConfigError::DuplicateSeason(source.season));
            }
        }

        Ok(Self {
            api_key,
            playlists,
            cache_dir,
            output_path,
        })
    }
}

/// Default cache directory: the system temporary directory
pub fn default_cache_dir() -> PathBuf {
    std::env::temp_dir()
}

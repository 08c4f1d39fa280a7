//! Cache storage module
//!
//! This module provides persistent caching of raw API response bodies. Each
//! cached blob lives in its own file whose name is derived from the identifier
//! it was fetched for. Entries are never expired or refreshed; deleting the file
//! is the only way to force a new fetch.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    /// Failed to create or access cache directory
    #[error("Failed to create cache directory at {path}: {source}")]
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// No blob is stored for the requested key
    #[error("No cache entry at {0}")]
    NotFound(PathBuf),

    /// Failed to read cached data
    #[error("Failed to read cache file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write cached data
    #[error("Failed to write cache file {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Identifies a cached blob
///
/// Playlist and video responses are kept apart so that an identifier that
/// happens to be valid for both never collides.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum CacheKey {
    /// Raw `playlistItems` response for a playlist id
    Playlist(String),
    /// Raw `videos` response for a video id
    Video(String),
}

impl CacheKey {
    /// File name this key is stored under, e.g. `playlist_PLabc.json`
    pub fn file_name(&self) -> String {
        match self {
            CacheKey::Playlist(id) => format!("playlist_{}.json", sanitize_name(id)),
            CacheKey::Video(id) => format!("video_{}.json", sanitize_name(id)),
        }
    }
}

/// A keyed store of raw byte blobs
///
/// A single run is assumed to be the only writer; implementations do not
/// guard against concurrent modification.
pub(crate) trait BlobStore {
    /// Returns true if a blob is stored for `key`
    fn exists(&self, key: &CacheKey) -> bool;

    /// Reads the blob stored for `key`
    ///
    /// # Errors
    ///
    /// Returns `CacheError::NotFound` if nothing is stored for the key, or
    /// `CacheError::ReadFailed` if the blob exists but cannot be read.
    fn read(&self, key: &CacheKey) -> Result<Vec<u8>, CacheError>;

    /// Stores `data` under `key`, replacing any previous blob
    fn write(&self, key: &CacheKey, data: &[u8]) -> Result<(), CacheError>;
}

/// Filesystem-backed blob store
///
/// Every blob is stored verbatim as a file inside a single directory.
pub(crate) struct CacheStorage {
    /// The directory where cached blobs are stored
    cache_dir: PathBuf,
}

impl CacheStorage {
    /// Opens or creates a cache storage rooted at the given directory
    ///
    /// # Arguments
    ///
    /// * `cache_dir` - The directory to keep cached blobs in. It is created
    ///   (including parents) if it doesn't exist yet.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let cache = CacheStorage::open(&std::env::temp_dir())?;
    /// ```
    pub fn open(cache_dir: &Path) -> Result<Self, CacheError> {
        fs::create_dir_all(cache_dir).map_err(|e| CacheError::DirectoryCreationFailed {
            path: cache_dir.to_path_buf(),
            source: e,
        })?;

        Ok(Self {
            cache_dir: cache_dir.to_path_buf(),
        })
    }

    /// Returns the full path a key is stored at
    pub fn path_for(&self, key: &CacheKey) -> PathBuf {
        self.cache_dir.join(key.file_name())
    }

    /// Returns the path to the cache directory
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }
}

impl BlobStore for CacheStorage {
    fn exists(&self, key: &CacheKey) -> bool {
        self.path_for(key).is_file()
    }

    fn read(&self, key: &CacheKey) -> Result<Vec<u8>, CacheError> {
        let file_path = self.path_for(key);

        fs::read(&file_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CacheError::NotFound(file_path.clone())
            } else {
                CacheError::ReadFailed {
                    path: file_path.clone(),
                    source: e,
                }
            }
        })
    }

    fn write(&self, key: &CacheKey, data: &[u8]) -> Result<(), CacheError> {
        let file_path = self.path_for(key);

        // Write next to the target first, then rename into place (atomic on
        // the same filesystem)
        let temp_path = self
            .cache_dir
            .join(format!("{}.{}.tmp", key.file_name(), ulid::Ulid::new()));

        fs::write(&temp_path, data).map_err(|e| CacheError::WriteFailed {
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, &file_path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            CacheError::WriteFailed {
                path: file_path,
                source: e,
            }
        })
    }
}

/// Sanitizes an identifier for use in file names
///
/// Replaces all characters that are not ASCII alphanumeric or a hyphen with
/// underscores. Case is preserved: upstream identifiers are case-sensitive.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

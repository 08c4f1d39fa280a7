//! Aggregation and output of the catalog
//!
//! Collects the records of all playlists into a single result set and writes
//! it as one JSON document.

use crate::catalog::VideoRecord;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while writing the catalog
#[derive(Debug, Error)]
pub enum OutputError {
    /// Failed to serialize the result set
    #[error("Failed to encode catalog: {0}")]
    Encode(#[from] serde_json::Error),

    /// Failed to write the catalog file
    #[error("Failed to write catalog to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// All catalog records of a run
///
/// Records are ordered by playlist processing order, then by position within
/// the playlist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSet {
    pub videos: Vec<VideoRecord>,
}

impl ResultSet {
    /// Concatenates per-playlist record batches in the order given
    pub fn aggregate<I>(batches: I) -> Self
    where
        I: IntoIterator<Item = Vec<VideoRecord>>,
    {
        let mut result_set = Self::default();
        for batch in batches {
            result_set.extend(batch);
        }
        result_set
    }

    /// Appends the records of one playlist
    pub fn extend(&mut self, records: Vec<VideoRecord>) {
        self.videos.extend(records);
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }

    /// Serializes the result set as a pretty-printed JSON document
    pub fn to_json(&self) -> Result<Vec<u8>, OutputError> {
        Ok(serde_json::to_vec_pretty(self)?)
    }
}

/// A playlist that contributed no records, and why
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistFailure {
    pub season: usize,
    pub playlist_id: String,
    pub reason: String,
}

/// Outcome of a catalog run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogReport {
    /// Records of every playlist that could be processed
    pub result_set: ResultSet,
    /// Playlists that were skipped
    pub failures: Vec<PlaylistFailure>,
}

/// Writes a serialized catalog to `destination`
///
/// Missing parent directories are created.
pub fn persist(data: &[u8], destination: &Path) -> Result<(), OutputError> {
    let write_failed = |source: std::io::Error| OutputError::WriteFailed {
        path: destination.to_path_buf(),
        source,
    };

    if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_failed)?;
    }

    fs::write(destination, data).map_err(write_failed)
}

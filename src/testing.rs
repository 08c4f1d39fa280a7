//! In-memory collaborators for unit tests

use crate::cache::{BlobStore, CacheError, CacheKey};
use crate::youtube::{Endpoint, YouTubeApi, YouTubeApiError};
use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

/// A single call made against a `MemoryStore`
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StoreOp {
    Exists(CacheKey),
    Read(CacheKey),
    Write(CacheKey),
}

/// Blob store that keeps everything in memory and records every call
#[derive(Default)]
pub(crate) struct MemoryStore {
    blobs: RefCell<HashMap<CacheKey, Vec<u8>>>,
    ops: RefCell<Vec<StoreOp>>,
    fail_writes: bool,
}

impl MemoryStore {
    /// Makes every write fail with an IO error
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Seeds a blob without recording an operation
    pub fn insert(&self, key: CacheKey, data: &[u8]) {
        self.blobs.borrow_mut().insert(key, data.to_vec());
    }

    pub fn ops(&self) -> Vec<StoreOp> {
        self.ops.borrow().clone()
    }
}

impl BlobStore for MemoryStore {
    fn exists(&self, key: &CacheKey) -> bool {
        self.ops.borrow_mut().push(StoreOp::Exists(key.clone()));
        self.blobs.borrow().contains_key(key)
    }

    fn read(&self, key: &CacheKey) -> Result<Vec<u8>, CacheError> {
        self.ops.borrow_mut().push(StoreOp::Read(key.clone()));
        self.blobs
            .borrow()
            .get(key)
            .cloned()
            .ok_or_else(|| CacheError::NotFound(PathBuf::from(key.file_name())))
    }

    fn write(&self, key: &CacheKey, data: &[u8]) -> Result<(), CacheError> {
        self.ops.borrow_mut().push(StoreOp::Write(key.clone()));
        if self.fail_writes {
            return Err(CacheError::WriteFailed {
                path: PathBuf::from(key.file_name()),
                source: io::Error::other("disk full"),
            });
        }
        self.blobs.borrow_mut().insert(key.clone(), data.to_vec());
        Ok(())
    }
}

/// API source that fails the test when called
pub(crate) struct PanickingApi;

impl YouTubeApi for PanickingApi {
    fn fetch(&self, endpoint: Endpoint, id: &str) -> Result<Vec<u8>, YouTubeApiError> {
        panic!("API must not be called, got {endpoint} lookup for {id}");
    }
}

/// API source returning canned bodies and recording every call
///
/// Ids without a canned body get an HTTP 403 error.
pub(crate) struct StubApi {
    default: Option<Vec<u8>>,
    by_id: HashMap<String, Vec<u8>>,
    calls: RefCell<Vec<(Endpoint, String)>>,
}

impl StubApi {
    /// Answers every lookup with `body`
    pub fn new(body: &[u8]) -> Self {
        Self {
            default: Some(body.to_vec()),
            by_id: HashMap::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Answers every lookup with an HTTP error
    pub fn failing() -> Self {
        Self {
            default: None,
            by_id: HashMap::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Answers lookups of `id` with `body`
    pub fn with_response(mut self, id: &str, body: &[u8]) -> Self {
        self.by_id.insert(id.to_string(), body.to_vec());
        self
    }

    pub fn calls(&self) -> Vec<(Endpoint, String)> {
        self.calls.borrow().clone()
    }
}

impl YouTubeApi for StubApi {
    fn fetch(&self, endpoint: Endpoint, id: &str) -> Result<Vec<u8>, YouTubeApiError> {
        self.calls.borrow_mut().push((endpoint, id.to_string()));
        self.by_id
            .get(id)
            .or(self.default.as_ref())
            .cloned()
            .ok_or_else(|| YouTubeApiError::HttpStatus {
                status: 403,
                body: "forbidden".to_string(),
            })
    }
}

/// Builds a playlistItems response body from `(video id, title)` pairs
pub(crate) fn playlist_body(entries: &[(&str, &str)]) -> Vec<u8> {
    let items: Vec<_> = entries
        .iter()
        .map(|(id, title)| {
            serde_json::json!({
                "snippet": {
                    "title": title,
                    "description": format!("About {title}"),
                    "thumbnails": {
                        "default": {
                            "url": format!("https://i.ytimg.com/vi/{id}/default.jpg"),
                            "width": 120,
                            "height": 90
                        }
                    }
                },
                "contentDetails": {"videoId": id}
            })
        })
        .collect();

    serde_json::to_vec(&serde_json::json!({ "items": items })).unwrap_or_default()
}

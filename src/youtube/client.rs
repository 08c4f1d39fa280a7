/// HTTP client for the YouTube Data API.
use super::{Endpoint, YouTubeApi, YouTubeApiError};
use crate::config::ApiKey;
use reqwest::Url;
use reqwest::header::ACCEPT;
use tracing::{debug, warn};

/// Production host of the YouTube Data API
const DEFAULT_BASE_URL: &str = "https://youtube.googleapis.com";

/// Fetches raw responses from the YouTube Data API.
///
/// Each call is a single blocking GET with the transport's default timeout.
/// Nothing is retried.
pub(crate) struct YouTubeClient {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: ApiKey,
}

impl YouTubeClient {
    /// Creates a client for the production API.
    pub fn new(api_key: ApiKey) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Creates a client for an alternative host, e.g. a local test server.
    pub fn with_base_url(api_key: ApiKey, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: base_url.into(),
            api_key,
        }
    }

    /// Builds the request URL for looking up `id` on `endpoint`.
    fn request_url(&self, endpoint: Endpoint, id: &str) -> Result<Url, YouTubeApiError> {
        let base = format!(
            "{}/youtube/v3/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.path()
        );

        Url::parse_with_params(&base, endpoint.query(id, self.api_key.as_str()))
            .map_err(|e| YouTubeApiError::RequestError(e.to_string()))
    }
}

impl YouTubeApi for YouTubeClient {
    fn fetch(&self, endpoint: Endpoint, id: &str) -> Result<Vec<u8>, YouTubeApiError> {
        let url = self.request_url(endpoint, id)?;

        // The URL carries the API key, so only the endpoint and id are logged
        debug!(%endpoint, id, "Requesting YouTube API");

        // Errors are stripped of their URL for the same reason
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|e| YouTubeApiError::RequestError(e.without_url().to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .map_err(|e| YouTubeApiError::RequestError(e.without_url().to_string()))?;

        // An error payload must not end up in the cache, where it would stick
        if !status.is_success() {
            warn!(%endpoint, id, status = status.as_u16(), "YouTube API returned an error");
            return Err(YouTubeApiError::HttpStatus {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(body.to_vec())
    }
}

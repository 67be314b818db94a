use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::config::RadarrConfig;

use super::types::RadarrMovie;

/// Timeout for Radarr API requests
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// How much of an upstream error body is kept for diagnostics.
const BODY_SNIPPET_LEN: usize = 512;

/// Errors from the Radarr API client.
#[derive(Debug, thiserror::Error)]
pub enum RadarrError {
    /// The request could not be sent or the response body not read.
    #[error("Radarr request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Radarr answered with a non-success status.
    #[error("Radarr API error: {status} - {body}")]
    Api { status: StatusCode, body: String },
}

/// Stateless client for the Radarr v3 API.
///
/// Performs no caching; callers that want cached lookups go through the
/// poster resolver.
pub struct RadarrClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RadarrClient {
    pub fn new(config: &RadarrConfig) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client with timeout: {}", e);
                Client::new()
            });

        Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    /// Fetch the full movie catalog from `GET /api/v3/movie`.
    pub async fn fetch_catalog(&self) -> Result<Vec<RadarrMovie>, RadarrError> {
        let url = format!("{}/api/v3/movie", self.base_url);
        tracing::debug!(url = %url, "Fetching Radarr catalog");

        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = body_snippet(response).await;
            return Err(RadarrError::Api { status, body });
        }

        let movies: Vec<RadarrMovie> = response.json().await?;
        tracing::debug!(count = movies.len(), "Radarr catalog fetched");
        Ok(movies)
    }
}

/// Read at most [`BODY_SNIPPET_LEN`] characters of an error response body.
async fn body_snippet(response: reqwest::Response) -> String {
    let body = response.text().await.unwrap_or_default();
    if body.chars().count() > BODY_SNIPPET_LEN {
        let mut snippet: String = body.chars().take(BODY_SNIPPET_LEN).collect();
        snippet.push_str("...");
        snippet
    } else {
        body
    }
}

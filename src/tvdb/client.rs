use std::time::Duration;

use chrono::TimeDelta;
use reqwest::Client;
use serde::Deserialize;

use crate::config::TvdbConfig;

use super::token::TokenManager;
use super::TvdbError;

/// Timeout for TVDB API requests
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(default)]
    image: Option<String>,
}

/// Client for the TVDB v4 search API.
///
/// Stateless per call apart from the login token, which is owned by the
/// embedded [`TokenManager`]. Results are never cached here.
pub struct TvdbClient {
    client: Client,
    base_url: String,
    tokens: TokenManager,
}

impl TvdbClient {
    pub fn new(config: &TvdbConfig) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client with timeout: {}", e);
                Client::new()
            });

        let renewal_window = TimeDelta::days(i64::from(config.token_renewal_days));
        let tokens = TokenManager::new(
            client.clone(),
            &config.base_url,
            &config.api_key,
            renewal_window,
        );

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    /// Search for a series by name and return the top result's poster URL.
    pub async fn search_poster(&self, query: &str) -> Result<String, TvdbError> {
        let token = self.tokens.acquire().await?;

        let url = format!("{}/v4/search", self.base_url);
        tracing::debug!(query, "TVDB poster search");

        let response = self
            .client
            .get(&url)
            .query(&[("query", query), ("type", "series")])
            .bearer_auth(token)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = super::body_snippet(response).await;
            return Err(TvdbError::Api { status, body });
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| TvdbError::MalformedResponse(format!("search response: {e}")))?;

        let first = body
            .data
            .into_iter()
            .next()
            .ok_or_else(|| TvdbError::NoResults(query.to_string()))?;

        first
            .image
            .filter(|image| !image.is_empty())
            .ok_or_else(|| TvdbError::NoImage(query.to_string()))
    }
}

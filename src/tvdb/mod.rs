//! TVDB v4 integration: the metadata provider used for poster search.

mod client;
mod token;

pub use client::TvdbClient;
pub use token::TokenManager;

use reqwest::StatusCode;

/// How much of an upstream error body is kept for diagnostics.
const BODY_SNIPPET_LEN: usize = 512;

/// Errors from the TVDB client and token manager.
#[derive(Debug, thiserror::Error)]
pub enum TvdbError {
    /// The request could not be sent or the response body not read.
    #[error("TVDB request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Login was rejected. Kept apart from [`TvdbError::Api`] so callers can
    /// tell a bad credential from an ordinary upstream failure.
    #[error("TVDB login failed: {status} - {body}")]
    Auth { status: StatusCode, body: String },

    /// An authenticated call answered with a non-success status.
    #[error("TVDB API error: {status} - {body}")]
    Api { status: StatusCode, body: String },

    /// A response decoded but did not have the expected shape.
    #[error("malformed TVDB response: {0}")]
    MalformedResponse(String),

    /// The search returned no results at all.
    #[error("no TVDB results found for '{0}'")]
    NoResults(String),

    /// The top search result carried no image.
    #[error("TVDB result for '{0}' has no image")]
    NoImage(String),
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

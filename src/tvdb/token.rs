//! Lazily renewed TVDB login token.
//!
//! TVDB v4 issues a bearer token from `POST /v4/login` but never reports how
//! long it stays valid, so the manager applies a local renewal window (weeks
//! by default) and re-authenticates once it elapses. The token lives only in
//! memory and dies with the process.

use chrono::{DateTime, TimeDelta, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::TvdbError;

/// The single in-memory token slot.
#[derive(Debug, Clone)]
struct AuthToken {
    value: String,
    expires_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    apikey: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    data: LoginData,
}

#[derive(Deserialize)]
struct LoginData {
    token: String,
}

/// Owns the TVDB bearer token and renews it on demand.
///
/// The slot is guarded by an async mutex held across the whole renewal, so
/// concurrent [`acquire`](Self::acquire) calls never race duplicate logins:
/// while one task authenticates, the others wait and then read the fresh
/// token without touching the network.
pub struct TokenManager {
    client: Client,
    base_url: String,
    api_key: String,
    renewal_window: TimeDelta,
    slot: Mutex<Option<AuthToken>>,
}

impl TokenManager {
    pub fn new(client: Client, base_url: &str, api_key: &str, renewal_window: TimeDelta) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            renewal_window,
            slot: Mutex::new(None),
        }
    }

    /// Return a valid bearer token, logging in first if the slot is empty or
    /// past its renewal window.
    ///
    /// On login failure the slot stays empty, so the next call retries the
    /// login instead of reusing a token that is absent or suspect.
    pub async fn acquire(&self) -> Result<String, TvdbError> {
        let mut slot = self.slot.lock().await;

        if let Some(token) = slot.as_ref() {
            if Utc::now() < token.expires_at {
                return Ok(token.value.clone());
            }
            tracing::debug!("TVDB token past renewal window, re-authenticating");
        }

        // Discard any stale token before renewing; a failed login must not
        // leave a token a later call could mistake for valid.
        *slot = None;

        let value = self.login().await?;
        *slot = Some(AuthToken {
            value: value.clone(),
            expires_at: Utc::now() + self.renewal_window,
        });

        tracing::info!("Obtained new TVDB login token");
        Ok(value)
    }

    async fn login(&self) -> Result<String, TvdbError> {
        let url = format!("{}/v4/login", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&LoginRequest {
                apikey: &self.api_key,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = super::body_snippet(response).await;
            return Err(TvdbError::Auth { status, body });
        }

        let body: LoginResponse = response
            .json()
            .await
            .map_err(|e| TvdbError::MalformedResponse(format!("login response: {e}")))?;

        if body.data.token.is_empty() {
            return Err(TvdbError::MalformedResponse(
                "login response carried an empty token".to_string(),
            ));
        }

        Ok(body.data.token)
    }
}

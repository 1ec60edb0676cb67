//! OAuth token management for the calendar adapter
//!
//! The interactive authorization-code flow runs out of band and leaves a
//! token file on disk. This module loads that file, hands out a valid bearer
//! token before each adapter call, and refreshes transparently against the
//! OAuth token endpoint when the stored access token is about to expire.

use std::path::PathBuf;

use chrono::{Duration, Utc};
use reqwest::Method;
use slotbot_domain::{Result, SlotBotError};
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::types::{StoredToken, TokenRefreshResponse};
use crate::http::HttpClient;

const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
/// Refresh when less than this many seconds of validity remain.
const REFRESH_THRESHOLD_SECS: i64 = 300;

/// Loads, refreshes, and persists the OAuth credential for calendar calls.
pub struct TokenManager {
    http_client: HttpClient,
    client_id: String,
    client_secret: String,
    token_path: PathBuf,
    token_url: String,
    // Serializes refreshes so concurrent adapter calls do not race the file.
    cached: Mutex<Option<StoredToken>>,
}

impl TokenManager {
    /// Create a manager for the token file at `token_path`.
    pub fn new(
        http_client: HttpClient,
        client_id: String,
        client_secret: String,
        token_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            http_client,
            client_id,
            client_secret,
            token_path: token_path.into(),
            token_url: GOOGLE_TOKEN_URL.to_string(),
            cached: Mutex::new(None),
        }
    }

    /// Point the manager at a different token endpoint (for testing).
    #[cfg(test)]
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    /// Return a currently-valid access token, refreshing if needed.
    pub async fn access_token(&self) -> Result<String> {
        let mut cached = self.cached.lock().await;

        let token = match cached.take() {
            Some(token) => token,
            None => self.load_from_disk().await?,
        };

        let remaining = token.expiry - Utc::now();
        if remaining > Duration::seconds(REFRESH_THRESHOLD_SECS) {
            debug!(remaining_secs = remaining.num_seconds(), "reusing stored access token");
            let access = token.access_token.clone();
            *cached = Some(token);
            return Ok(access);
        }

        let refreshed = self.refresh(&token).await?;
        self.persist(&refreshed).await?;
        let access = refreshed.access_token.clone();
        *cached = Some(refreshed);
        Ok(access)
    }

    async fn load_from_disk(&self) -> Result<StoredToken> {
        let raw = tokio::fs::read_to_string(&self.token_path).await.map_err(|err| {
            SlotBotError::Auth(format!(
                "cannot read token file {}: {err}; run the authorization flow first",
                self.token_path.display()
            ))
        })?;

        serde_json::from_str(&raw)
            .map_err(|err| SlotBotError::Auth(format!("token file is malformed: {err}")))
    }

    async fn refresh(&self, token: &StoredToken) -> Result<StoredToken> {
        info!("refreshing expired calendar access token");

        let request = self.http_client.request(Method::POST, &self.token_url).form(&[
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("refresh_token", token.refresh_token.as_str()),
            ("grant_type", "refresh_token"),
        ]);

        let response = self
            .http_client
            .send(request)
            .await
            .map_err(|err| SlotBotError::Auth(format!("token refresh request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SlotBotError::Auth(format!("token refresh failed ({status}): {body}")));
        }

        let refresh_response: TokenRefreshResponse = response
            .json()
            .await
            .map_err(|err| SlotBotError::Auth(format!("failed to parse token response: {err}")))?;

        Ok(StoredToken {
            access_token: refresh_response.access_token,
            refresh_token: token.refresh_token.clone(),
            expiry: Utc::now() + Duration::seconds(refresh_response.expires_in),
        })
    }

    async fn persist(&self, token: &StoredToken) -> Result<()> {
        let serialized = serde_json::to_string_pretty(token)
            .map_err(|err| SlotBotError::Internal(format!("failed to serialize token: {err}")))?;

        tokio::fs::write(&self.token_path, serialized).await.map_err(|err| {
            SlotBotError::Auth(format!(
                "failed to persist token file {}: {err}",
                self.token_path.display()
            ))
        })
    }
}

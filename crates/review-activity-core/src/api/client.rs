//! HTTP client for the completed-submissions endpoint.

use reqwest::header::{AUTHORIZATION, CONTENT_LENGTH};
use reqwest::{Client, StatusCode};

use super::events::{decode_events, ReviewEvent};
use crate::config::{AuthToken, RunConfig};
use crate::error::FetchError;

const USER_AGENT: &str = concat!("review-activity/", env!("CARGO_PKG_VERSION"));
const COMPLETED_PATH: &str = "/me/submissions/completed/";
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Authenticated client for the reviewer's completed-submissions endpoint.
pub struct ReviewClient {
    http: Client,
    base_url: String,
    token: AuthToken,
}

impl ReviewClient {
    /// Build a client from the resolved run configuration.
    pub fn new(config: &RunConfig) -> Result<Self, FetchError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
            token: config.token.clone(),
        })
    }

    /// Full URL of the completed-submissions endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, COMPLETED_PATH)
    }

    /// Fetch every completed review of the authenticated reviewer.
    ///
    /// A single request is made. 401 and 403 map to
    /// [`FetchError::Authentication`]; other failures are returned as is.
    // TODO: retry connection errors and 5xx with backoff once the endpoint's
    // rate limits are known.
    pub async fn fetch_completed(&self) -> Result<Vec<ReviewEvent>, FetchError> {
        let url = self.endpoint();
        tracing::debug!(%url, "requesting completed reviews");

        // The platform expects the raw token, not a Bearer scheme.
        let resp = self
            .http
            .get(&url)
            .header(AUTHORIZATION, self.token.as_str())
            .header(CONTENT_LENGTH, "0")
            .send()
            .await?;

        let status = resp.status();
        tracing::debug!(status = status.as_u16(), "review API responded");

        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            return Err(FetchError::Authentication(format!(
                "server rejected the token (HTTP {})",
                status.as_u16()
            )));
        }

        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(FetchError::UnexpectedStatus {
                status: status.as_u16(),
                body: text.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let body = resp.text().await?;
        tracing::debug!(bytes = body.len(), "received response body");

        let events = decode_events(&body)?;
        for event in &events {
            tracing::debug!(
                id = ?event.id,
                completed_at = %event.timestamp,
                points = event.points,
                "decoded review"
            );
        }

        if events.is_empty() {
            tracing::warn!("review API returned no completed reviews");
        }

        Ok(events)
    }
}

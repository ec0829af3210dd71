//! HTTP client for the remote scoring service.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::HistoryError;
use crate::models::{AttemptRecord, SaveScoreRequest, ScoreRecord};

// ============================================================================
// Constants
// ============================================================================

/// Endpoint returning the session user's attempt history
pub const FETCH_SCORES_PATH: &str = "api/fetchScores";

/// Endpoint persisting one score for the session user
pub const SAVE_SCORE_PATH: &str = "api/saveScore";

/// The remote source of truth for scores.
#[async_trait]
pub trait ScoreService: Send + Sync {
    /// Read the attempt history visible to the current session.
    async fn fetch_attempts(&self) -> Result<Vec<AttemptRecord>, HistoryError>;

    /// Persist one score under the identity behind `token`.
    async fn save_score(&self, token: &str, score: u32) -> Result<ScoreRecord, HistoryError>;
}

#[async_trait]
impl<T: ScoreService + ?Sized> ScoreService for Arc<T> {
    async fn fetch_attempts(&self) -> Result<Vec<AttemptRecord>, HistoryError> {
        (**self).fetch_attempts().await
    }

    async fn save_score(&self, token: &str, score: u32) -> Result<ScoreRecord, HistoryError> {
        (**self).save_score(token, score).await
    }
}

/// API client for the scoring service.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ScoringClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ScoringClient {
    /// Create a new client against `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Set the bearer token for authenticated requests
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn auth_headers(token: Option<&str>) -> Result<header::HeaderMap, HistoryError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));
        if let Some(token) = token {
            let value = header::HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| HistoryError::Unauthorized)?;
            headers.insert(header::AUTHORIZATION, value);
        }
        Ok(headers)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, HistoryError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(HistoryError::from_status(status, &body))
        }
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, HistoryError> {
        let text = response.text().await?;
        parse_json(&text)
    }
}

/// Parse a response body, mapping failures to `MalformedResponse`.
fn parse_json<T: DeserializeOwned>(body: &str) -> Result<T, HistoryError> {
    serde_json::from_str(body).map_err(|e| HistoryError::MalformedResponse(e.to_string()))
}

/// Parse the history read body. Any record without questions makes the
/// whole body malformed.
pub(crate) fn parse_attempts(body: &str) -> Result<Vec<AttemptRecord>, HistoryError> {
    let attempts: Vec<AttemptRecord> = parse_json(body)?;
    if let Some(bad) = attempts.iter().find(|a| !a.is_valid()) {
        return Err(HistoryError::MalformedResponse(format!(
            "attempt on {} has no questions",
            bad.date
        )));
    }
    Ok(attempts)
}

#[async_trait]
impl ScoreService for ScoringClient {
    async fn fetch_attempts(&self) -> Result<Vec<AttemptRecord>, HistoryError> {
        let url = self.endpoint(FETCH_SCORES_PATH);
        let response = self
            .client
            .get(&url)
            .headers(Self::auth_headers(self.token.as_deref())?)
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        let text = response.text().await?;
        let attempts = parse_attempts(&text)?;

        debug!(url = %url, count = attempts.len(), "Fetched remote attempts");
        Ok(attempts)
    }

    async fn save_score(&self, token: &str, score: u32) -> Result<ScoreRecord, HistoryError> {
        let url = self.endpoint(SAVE_SCORE_PATH);
        let response = self
            .client
            .post(&url)
            .headers(Self::auth_headers(Some(token))?)
            .json(&SaveScoreRequest { score })
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        Self::read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let client = ScoringClient::new("http://localhost:3000/", Duration::from_secs(5))
            .expect("client");
        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(
            client.endpoint(FETCH_SCORES_PATH),
            "http://localhost:3000/api/fetchScores"
        );
        assert_eq!(client.endpoint("/api/saveScore"), "http://localhost:3000/api/saveScore");
    }

    #[test]
    fn test_auth_headers_bearer() {
        let headers = ScoringClient::auth_headers(Some("tok")).expect("headers");
        assert_eq!(headers.get(header::AUTHORIZATION).unwrap(), "Bearer tok");

        let anonymous = ScoringClient::auth_headers(None).expect("headers");
        assert!(anonymous.get(header::AUTHORIZATION).is_none());
    }

    #[test]
    fn test_parse_attempts_body() {
        let body = r#"[{"date":"2024-01-01T00:00:00Z","score":8,"totalQuestions":10}]"#;
        let attempts = parse_attempts(body).expect("parse");
        assert_eq!(attempts.len(), 1);
        assert_eq!(attempts[0].score, 8);

        assert_eq!(parse_attempts("[]").expect("parse"), Vec::new());
    }

    #[test]
    fn test_parse_attempts_malformed() {
        assert!(matches!(
            parse_attempts(r#"{"error":"oops"}"#),
            Err(HistoryError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_attempts(r#"[{"date":"2024-01-01T00:00:00Z","score":1,"totalQuestions":0}]"#),
            Err(HistoryError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_remote_unavailable() {
        let client = ScoringClient::new("http://127.0.0.1:1", Duration::from_secs(2))
            .expect("client");
        let result = client.fetch_attempts().await;
        assert!(matches!(result, Err(HistoryError::RemoteUnavailable(_))));
    }
}

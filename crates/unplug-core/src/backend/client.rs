//! HTTP client for the Unplug backend.
//!
//! JSON over HTTP/1.1 against a configurable base URL. Every call is a
//! single attempt with fixed connect/request timeouts; a failed call
//! surfaces to the user and is retried only by a new user action.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::error::BackendError;

#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
    http: Client,
}

#[derive(Deserialize)]
struct QuestionsResponse {
    questions: Vec<String>,
}

#[derive(Deserialize)]
struct ChatResponse {
    response: String,
}

impl BackendClient {
    /// Build a client for the given base URL with the given connect and
    /// overall request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        Url::parse(base_url).map_err(|e| BackendError::InvalidBaseUrl(e.to_string()))?;
        let http = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn expect_success(resp: Response) -> Result<Response, BackendError> {
        let status = resp.status();
        if status.is_success() {
            Ok(resp)
        } else {
            Err(BackendError::Server {
                status: status.as_u16(),
            })
        }
    }

    /// Liveness probe. Any 2xx body counts as alive.
    pub async fn ping(&self) -> Result<(), BackendError> {
        let url = self.endpoint("ping");
        debug!(%url, "pinging backend");
        let resp = self.http.get(&url).send().await?;
        Self::expect_success(resp)?;
        Ok(())
    }

    /// Fetch the quiz question set.
    pub async fn questions(&self) -> Result<Vec<String>, BackendError> {
        let url = self.endpoint("mbti/questions");
        debug!(%url, "fetching questions");
        let resp = self.http.get(&url).send().await?;
        let resp = Self::expect_success(resp)?;
        let body: QuestionsResponse = resp.json().await?;
        Ok(body.questions)
    }

    /// Send one chat message; returns the assistant reply.
    pub async fn chat(
        &self,
        personality: &str,
        user_message: &str,
    ) -> Result<String, BackendError> {
        let url = self.endpoint("chat");
        debug!(%url, personality, "sending chat message");
        let resp = self
            .http
            .post(&url)
            .json(&json!({
                "personality": personality,
                "user_message": user_message,
            }))
            .send()
            .await?;
        let resp = Self::expect_success(resp)?;
        let body: ChatResponse = resp.json().await?;
        Ok(body.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped_from_base_url() {
        let client = BackendClient::new("http://127.0.0.1:5000/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.endpoint("ping"), "http://127.0.0.1:5000/ping");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = BackendClient::new("not a url", Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, BackendError::InvalidBaseUrl(_)));
    }
}

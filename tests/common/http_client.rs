//! HTTP client helpers for tests.

use scorer::constants::SCORER_STATUS_HEADER;
use scorer::rubric::Rubric;
use scorer::scoring::ScoreReport;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(DEFAULT_TIMEOUT_SECS);

pub struct TestClient {
    client: reqwest::Client,
    base_url: String,
}

impl TestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{}", self.base_url, path)
    }

    /// Posts a raw JSON body to `/score`, returning the report and `x-scorer-status`.
    pub async fn score_raw(
        &self,
        body: serde_json::Value,
    ) -> Result<(ScoreReport, String), TestClientError> {
        let resp = self
            .client
            .post(self.url("/score"))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status_header = scorer_status(&resp);

        match resp.status().as_u16() {
            200 => Ok((resp.json().await?, status_header)),
            400 | 415 | 422 => Err(TestClientError::BadRequest(resp.text().await?)),
            status => {
                let body = resp.text().await.unwrap_or_default();
                Err(TestClientError::UnexpectedStatus(status, body))
            }
        }
    }

    pub async fn score(
        &self,
        transcript: &str,
        rubric_id: Option<&str>,
    ) -> Result<(ScoreReport, String), TestClientError> {
        let mut body = serde_json::json!({ "transcript": transcript });
        if let Some(id) = rubric_id {
            body["rubric_id"] = serde_json::Value::String(id.to_string());
        }
        self.score_raw(body).await
    }

    pub async fn rubric(&self, rubric_id: &str) -> Result<Rubric, TestClientError> {
        let resp = self
            .client
            .get(self.url(&format!("/rubrics/{}", rubric_id)))
            .send()
            .await?;

        if resp.status().is_success() {
            let body = resp.text().await?;
            Rubric::from_json_str(&body, "response")
                .map_err(|e| TestClientError::UnexpectedStatus(200, e.to_string()))
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            Err(TestClientError::UnexpectedStatus(status, body))
        }
    }

    pub async fn health(&self) -> Result<HealthResponse, TestClientError> {
        let resp = self.client.get(self.url("/health")).send().await?;

        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            Err(TestClientError::UnexpectedStatus(status, body))
        }
    }
}

fn scorer_status(resp: &reqwest::Response) -> String {
    resp.headers()
        .get(SCORER_STATUS_HEADER)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TestClientError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Unexpected HTTP status: {0} - Body: {1}")]
    UnexpectedStatus(u16, String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_url_building() {
        let client = TestClient::new("http://localhost:8000");
        assert_eq!(client.url("/health"), "http://localhost:8000/health");
        assert_eq!(client.url("health"), "http://localhost:8000/health");
    }
}

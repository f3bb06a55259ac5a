//! HTTP client helpers for tests.

use serde::Deserialize;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

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
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Uploads `document` and returns the report plus the `x-clarity-status` header.
    pub async fn analyze(
        &self,
        document: impl Into<reqwest::Body>,
    ) -> Result<(AnalyzeResponse, String), TestClientError> {
        let resp = self
            .client
            .post(self.url("/analyze"))
            .header("Content-Type", "application/octet-stream")
            .body(document)
            .send()
            .await?;

        let status_header = resp
            .headers()
            .get("x-clarity-status")
            .and_then(|h| h.to_str().ok())
            .unwrap_or("unknown")
            .to_string();

        match resp.status().as_u16() {
            200 => Ok((resp.json().await?, status_header)),
            400 => Err(TestClientError::BadRequest(resp.json().await?)),
            status => {
                let body = resp.text().await.unwrap_or_default();
                Err(TestClientError::UnexpectedStatus(status, body))
            }
        }
    }

    pub async fn health(&self) -> Result<HealthResponse, TestClientError> {
        let resp = self.client.get(self.url("/healthz")).send().await?;
        Ok(resp.error_for_status()?.json().await?)
    }

    pub async fn ready(&self) -> Result<serde_json::Value, TestClientError> {
        let resp = self.client.get(self.url("/ready")).send().await?;
        Ok(resp.error_for_status()?.json().await?)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResultRow {
    pub id: serde_json::Value,
    pub original_question: String,
    pub score: u8,
    pub justification: String,
    pub final_text: String,
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeResponse {
    pub request_id: String,
    pub analyzed_at: i64,
    pub results: Vec<ResultRow>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: u16,
}

#[derive(Debug, thiserror::Error)]
pub enum TestClientError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Unexpected HTTP status: {0} - Body: {1}")]
    UnexpectedStatus(u16, String),

    #[error("Bad request: {0:?}")]
    BadRequest(ErrorBody),
}

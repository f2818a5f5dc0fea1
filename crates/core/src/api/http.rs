//! REST client for the generation backend.
//!
//! Wraps the backend's HTTP routes (image and video submission, job status,
//! artifact download) using [`reqwest`].

use crate::api::base::{ApiError, GenerationApi};
use async_trait::async_trait;
use fr_protocol::job_models::{ErrorResponse, JobStatusResponse, SubmitResponse};

/// HTTP client for a single generation backend.
pub struct HttpGenerationApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGenerationApi {
    /// Create a new client for a backend.
    ///
    /// * `base_url` - Base HTTP URL, e.g. `http://localhost:5000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a route against the base URL. Absolute URLs pass through.
    pub fn resolve(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code, turning failures into
    /// [`ApiError::Status`] with the backend's `error` message.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        Err(ApiError::Status {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl GenerationApi for HttpGenerationApi {
    async fn submit(
        &self,
        path: &str,
        payload: &serde_json::Value,
    ) -> Result<SubmitResponse, ApiError> {
        let url = self.resolve(path);
        tracing::debug!(url = %url, "Submitting generation request");

        let response = self.client.post(&url).json(payload).send().await?;
        let submitted: SubmitResponse = Self::parse_response(response).await?;

        if submitted.job_id.trim().is_empty() {
            return Err(ApiError::Decode(
                "submission response carried an empty job_id".to_string(),
            ));
        }
        Ok(submitted)
    }

    async fn fetch_status(&self, url: &str) -> Result<JobStatusResponse, ApiError> {
        let response = self.client.get(self.resolve(url)).send().await?;
        Self::parse_response(response).await
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let response = self.client.get(self.resolve(url)).send().await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

/// Extract a user-facing message from an error body.
///
/// Prefers the JSON `error` field, then the raw body, then "Unknown error".
fn error_message(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorResponse>(body) {
        return parsed.error;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Unknown error".to_string()
    } else {
        trimmed.to_string()
    }
}

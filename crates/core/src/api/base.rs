//! Base GenerationApi trait and supporting types.

use async_trait::async_trait;
use fr_protocol::job_models::{JobStatusResponse, SubmitResponse};
use thiserror::Error;

/// Errors from the generation backend boundary.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("Generation API error ({status}): {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// The body's `error` field, or the raw body when it is not JSON.
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("Malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status code, when the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Request(e) => e.status().map(|s| s.as_u16()),
            ApiError::Decode(_) => None,
        }
    }
}

/// The calls the generation flow makes against the backend.
///
/// Paths handed to `submit` and URLs handed to `fetch_status` may be
/// relative; implementations resolve them against their own base URL.
#[async_trait]
pub trait GenerationApi: Send + Sync {
    /// `POST` a JSON payload and return the created job.
    async fn submit(
        &self,
        path: &str,
        payload: &serde_json::Value,
    ) -> Result<SubmitResponse, ApiError>;

    /// `GET` the status of a job.
    async fn fetch_status(&self, url: &str) -> Result<JobStatusResponse, ApiError>;

    /// Fetch the raw bytes behind an artifact reference.
    async fn download(&self, url: &str) -> Result<Vec<u8>, ApiError>;
}

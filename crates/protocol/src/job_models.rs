//! Generation job models.
//!
//! These types describe the asynchronous jobs run by the generation backend
//! and the JSON bodies it returns. Field names match the backend exactly.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A server-side generation job that is polled until it reaches a
/// terminal state.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct Job {
    /// Opaque identifier returned by the submission call.
    pub id: String,

    /// Base URL (or path) to which `/{id}` is appended for status queries.
    pub status_endpoint: String,
}

impl Job {
    pub fn new(id: impl Into<String>, status_endpoint: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status_endpoint: status_endpoint.into(),
        }
    }

    /// The URL queried on every poll attempt.
    pub fn status_url(&self) -> String {
        format!("{}/{}", self.status_endpoint.trim_end_matches('/'), self.id)
    }
}

/// Terminal outcome of polling a job.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum JobResult {
    /// The job finished and produced an artifact reference.
    Completed { artifact: String },

    /// The backend reported the job as failed.
    Failed { reason: String },

    /// The attempt budget ran out before the job reached a terminal state.
    TimedOut { attempts: u32 },

    /// Polling was stopped by the caller.
    Cancelled,
}

impl JobResult {
    pub fn is_completed(&self) -> bool {
        matches!(self, JobResult::Completed { .. })
    }

    pub fn artifact(&self) -> Option<&str> {
        match self {
            JobResult::Completed { artifact } => Some(artifact),
            _ => None,
        }
    }
}

/// Body returned by a successful submission call (`202 Accepted`).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct SubmitResponse {
    pub job_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Body returned by the backend alongside a non-2xx status.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct ErrorResponse {
    pub error: String,
}

/// Body returned by `GET {status_endpoint}/{job_id}`.
///
/// Every field is optional: the backend returns `null` for fields that do
/// not apply, and a response without `status` is treated as still pending.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, TS)]
pub struct JobStatusResponse {
    #[serde(default)]
    pub job_id: Option<String>,

    /// `"completed"`, `"failed"`, or any other value meaning "still running".
    #[serde(default)]
    pub status: Option<String>,

    /// Artifact reference for image jobs.
    #[serde(default)]
    pub image_file: Option<String>,

    /// Artifact reference for video jobs.
    #[serde(default)]
    pub video_file: Option<String>,

    #[serde(default)]
    pub latency_sec: Option<f64>,

    /// Failure reason when `status` is `"failed"`.
    #[serde(default)]
    pub error: Option<String>,
}

impl JobStatusResponse {
    pub fn pending(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            ..Default::default()
        }
    }

    pub fn completed_image(image_file: impl Into<String>) -> Self {
        Self {
            status: Some("completed".to_string()),
            image_file: Some(image_file.into()),
            ..Default::default()
        }
    }

    pub fn completed_video(video_file: impl Into<String>) -> Self {
        Self {
            status: Some("completed".to_string()),
            video_file: Some(video_file.into()),
            ..Default::default()
        }
    }

    pub fn failed(error: Option<&str>) -> Self {
        Self {
            status: Some("failed".to_string()),
            error: error.map(str::to_string),
            ..Default::default()
        }
    }

    /// Artifact reference carried by a completed response, image first.
    pub fn artifact(&self) -> Option<&str> {
        self.image_file
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.video_file.as_deref().filter(|s| !s.is_empty()))
    }
}

//! Fixed-interval job polling.
//!
//! The [`JobPoller`] queries a job's status endpoint until the backend
//! reports a terminal state, the attempt budget runs out, or the caller
//! cancels. Transport and decode errors along the way are transient: they
//! consume an attempt and polling continues.

pub mod observer;

use crate::api::GenerationApi;
use fr_protocol::config_models::PollingConfig;
use fr_protocol::job_models::{Job, JobResult, JobStatusResponse};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub use observer::{format_elapsed, NoopObserver, ProgressObserver, ProgressUpdate, RecordingObserver};

/// Failure reason used when the backend reports `failed` without an `error`.
pub const GENERIC_FAILURE_REASON: &str = "Job failed";

/// Failure reason used when a completed job carries no artifact reference.
pub const MISSING_ARTIFACT_REASON: &str = "Job completed without an artifact reference";

/// Tunable parameters for the poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Delay between two status queries.
    pub interval: Duration,
    /// Maximum number of status queries for one job.
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            max_attempts: 180,
        }
    }
}

impl From<&PollingConfig> for PollConfig {
    fn from(config: &PollingConfig) -> Self {
        Self {
            interval: Duration::from_millis(config.interval_ms),
            max_attempts: config.max_attempts,
        }
    }
}

/// What a single status body says about the job.
#[derive(Debug, Clone, PartialEq, Eq)]
enum StatusCheck {
    Completed(String),
    Failed(String),
    Pending,
}

fn classify(body: &JobStatusResponse) -> StatusCheck {
    match body.status.as_deref() {
        Some("completed") => match body.artifact() {
            Some(artifact) => StatusCheck::Completed(artifact.to_string()),
            None => StatusCheck::Failed(MISSING_ARTIFACT_REASON.to_string()),
        },
        Some("failed") => StatusCheck::Failed(
            body.error
                .clone()
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| GENERIC_FAILURE_REASON.to_string()),
        ),
        _ => StatusCheck::Pending,
    }
}

/// Polls generation jobs against a [`GenerationApi`].
pub struct JobPoller {
    api: Arc<dyn GenerationApi>,
    config: PollConfig,
}

impl JobPoller {
    pub fn new(api: Arc<dyn GenerationApi>, config: PollConfig) -> Self {
        Self { api, config }
    }

    pub fn config(&self) -> PollConfig {
        self.config
    }

    /// Poll `job` until it reaches a terminal state.
    ///
    /// `label` prefixes every progress message (`"{label} ({elapsed})"`).
    /// The observer is called exactly once for every pending response;
    /// transient errors are logged but not reported to it.
    ///
    /// Returns [`JobResult::TimedOut`] after `max_attempts` queries without a
    /// terminal status, and [`JobResult::Cancelled`] as soon as `cancel`
    /// fires, including while a query or a wait is in progress.
    pub async fn poll(
        &self,
        job: &Job,
        label: &str,
        observer: &dyn ProgressObserver,
        cancel: &CancellationToken,
    ) -> JobResult {
        if job.id.trim().is_empty() {
            return JobResult::Failed {
                reason: "Job id is empty".to_string(),
            };
        }

        let url = job.status_url();
        let mut attempts: u32 = 0;

        while attempts < self.config.max_attempts {
            if cancel.is_cancelled() {
                tracing::info!(job_id = %job.id, attempts, "Polling cancelled");
                return JobResult::Cancelled;
            }

            attempts += 1;
            tracing::debug!(job_id = %job.id, url = %url, attempt = attempts, "Polling job status");

            let response = tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!(job_id = %job.id, attempts, "Polling cancelled");
                    return JobResult::Cancelled;
                }
                response = self.api.fetch_status(&url) => response,
            };

            match response {
                Ok(body) => match classify(&body) {
                    StatusCheck::Completed(artifact) => {
                        tracing::info!(job_id = %job.id, attempts, artifact = %artifact, "Job completed");
                        return JobResult::Completed { artifact };
                    }
                    StatusCheck::Failed(reason) => {
                        tracing::warn!(job_id = %job.id, attempts, reason = %reason, "Job failed");
                        return JobResult::Failed { reason };
                    }
                    StatusCheck::Pending => {
                        let elapsed = self.config.interval * attempts;
                        observer
                            .on_progress(ProgressUpdate {
                                attempt: attempts,
                                elapsed,
                                message: format!("{label} ({})", format_elapsed(elapsed)),
                            })
                            .await;
                    }
                },
                Err(e) => {
                    tracing::warn!(
                        job_id = %job.id,
                        attempt = attempts,
                        error = %e,
                        "Status check failed, retrying",
                    );
                }
            }

            if attempts >= self.config.max_attempts {
                break;
            }

            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!(job_id = %job.id, attempts, "Polling cancelled");
                    return JobResult::Cancelled;
                }
                _ = tokio::time::sleep(self.config.interval) => {}
            }
        }

        tracing::warn!(job_id = %job.id, attempts, "Generation timeout");
        JobResult::TimedOut { attempts }
    }
}

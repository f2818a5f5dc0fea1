//! Scripted in-memory backend for tests and dry runs.

use crate::api::base::{ApiError, GenerationApi};
use async_trait::async_trait;
use fr_protocol::job_models::{JobStatusResponse, SubmitResponse};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// A canned reply to a status query.
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    /// The backend answered with this body.
    Status(JobStatusResponse),
    /// The request failed before a usable body arrived.
    Transient(String),
}

/// One call made against the scripted backend, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    Submit {
        path: String,
        payload: serde_json::Value,
    },
    Status {
        url: String,
    },
    Download {
        url: String,
    },
}

#[derive(Debug, Clone)]
enum SubmitReply {
    Accepted(String),
    Rejected { status: u16, message: String },
}

#[derive(Default)]
struct Script {
    submissions: HashMap<String, VecDeque<SubmitReply>>,
    statuses: HashMap<String, VecDeque<ScriptedReply>>,
    downloads: HashMap<String, Vec<u8>>,
    calls: Vec<ApiCall>,
}

/// A [`GenerationApi`] that replays scripted responses.
///
/// Submissions are consumed in order per path. Status replies are consumed
/// in order per URL, and the last reply for a URL repeats forever, so a
/// single pending reply scripts a job that never finishes.
#[derive(Default)]
pub struct ScriptedGenerationApi {
    script: Mutex<Script>,
}

impl ScriptedGenerationApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept the next submission to `path` with `job_id`.
    pub fn on_submit(self, path: &str, job_id: &str) -> Self {
        self.push_submission(path, SubmitReply::Accepted(job_id.to_string()))
    }

    /// Reject the next submission to `path` with a non-2xx status.
    pub fn on_submit_error(self, path: &str, status: u16, message: &str) -> Self {
        self.push_submission(
            path,
            SubmitReply::Rejected {
                status,
                message: message.to_string(),
            },
        )
    }

    /// Queue replies for status queries against `url`.
    pub fn on_status(self, url: &str, replies: Vec<ScriptedReply>) -> Self {
        if let Ok(mut script) = self.script.lock() {
            script
                .statuses
                .entry(url.to_string())
                .or_default()
                .extend(replies);
        }
        self
    }

    /// Serve `bytes` for downloads of `url`.
    pub fn on_download(self, url: &str, bytes: Vec<u8>) -> Self {
        if let Ok(mut script) = self.script.lock() {
            script.downloads.insert(url.to_string(), bytes);
        }
        self
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<ApiCall> {
        self.script
            .lock()
            .map(|script| script.calls.clone())
            .unwrap_or_default()
    }

    /// Number of status queries made against `url`.
    pub fn status_queries(&self, url: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, ApiCall::Status { url: u } if u == url))
            .count()
    }

    /// Payloads submitted to `path`, in order.
    pub fn submitted_payloads(&self, path: &str) -> Vec<serde_json::Value> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ApiCall::Submit { path: p, payload } if p == path => Some(payload),
                _ => None,
            })
            .collect()
    }

    fn push_submission(self, path: &str, reply: SubmitReply) -> Self {
        if let Ok(mut script) = self.script.lock() {
            script
                .submissions
                .entry(path.to_string())
                .or_default()
                .push_back(reply);
        }
        self
    }

    fn with_script<T>(&self, f: impl FnOnce(&mut Script) -> T) -> Result<T, ApiError> {
        let mut script = self
            .script
            .lock()
            .map_err(|_| ApiError::Decode("scripted backend state poisoned".to_string()))?;
        Ok(f(&mut script))
    }
}

#[async_trait]
impl GenerationApi for ScriptedGenerationApi {
    async fn submit(
        &self,
        path: &str,
        payload: &serde_json::Value,
    ) -> Result<SubmitResponse, ApiError> {
        let reply = self.with_script(|script| {
            script.calls.push(ApiCall::Submit {
                path: path.to_string(),
                payload: payload.clone(),
            });
            script
                .submissions
                .get_mut(path)
                .and_then(VecDeque::pop_front)
        })?;

        match reply {
            Some(SubmitReply::Accepted(job_id)) => Ok(SubmitResponse {
                job_id,
                status: Some("processing".to_string()),
                message: None,
            }),
            Some(SubmitReply::Rejected { status, message }) => {
                Err(ApiError::Status { status, message })
            }
            None => Err(ApiError::Status {
                status: 404,
                message: format!("no scripted submission for {path}"),
            }),
        }
    }

    async fn fetch_status(&self, url: &str) -> Result<JobStatusResponse, ApiError> {
        let reply = self.with_script(|script| -> Option<ScriptedReply> {
            script.calls.push(ApiCall::Status {
                url: url.to_string(),
            });
            let queue = script.statuses.get_mut(url)?;
            if queue.len() > 1 {
                queue.pop_front()
            } else {
                queue.front().cloned()
            }
        })?;

        match reply {
            Some(ScriptedReply::Status(body)) => Ok(body),
            Some(ScriptedReply::Transient(reason)) => Err(ApiError::Decode(reason)),
            None => Err(ApiError::Status {
                status: 404,
                message: "Job not found".to_string(),
            }),
        }
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let bytes = self.with_script(|script| {
            script.calls.push(ApiCall::Download {
                url: url.to_string(),
            });
            script.downloads.get(url).cloned()
        })?;

        bytes.ok_or_else(|| ApiError::Status {
            status: 404,
            message: format!("no scripted download for {url}"),
        })
    }
}

//! Error types for generation runs.

use crate::api::ApiError;
use thiserror::Error;

/// Why a generation run stopped before producing its final artifact.
///
/// `stage` fields carry the stage's display name (e.g. `"Image"`).
#[derive(Error, Debug)]
pub enum GenerationError {
    /// The backend rejected a submission with a non-2xx status.
    #[error("{stage} generation failed: {status} - {message}")]
    Submission {
        stage: String,
        status: u16,
        message: String,
    },

    /// A submission never got a usable answer (network, malformed body).
    #[error("{stage} generation request failed: {source}")]
    Transport {
        stage: String,
        #[source]
        source: ApiError,
    },

    /// The backend reported the job as failed.
    #[error("{reason}")]
    JobFailed { stage: String, reason: String },

    /// The attempt budget ran out while the job was still pending.
    #[error("Generation timeout")]
    Timeout { stage: String, attempts: u32 },

    /// The run was cancelled by a restart or shutdown.
    #[error("Generation cancelled")]
    Cancelled { stage: String },

    /// A stage needs the artifact of the stage before it, and there is none.
    #[error("{stage} stage requires an artifact from a previous stage")]
    MissingArtifact { stage: String },

    /// A stage's payload could not be serialised.
    #[error("Failed to build {stage} request: {source}")]
    Payload {
        stage: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("No generation stages configured")]
    EmptyPipeline,
}

impl GenerationError {
    /// Map a submission failure onto the error taxonomy.
    pub fn from_submission(stage: &str, error: ApiError) -> Self {
        match error {
            ApiError::Status { status, message } => GenerationError::Submission {
                stage: stage.to_string(),
                status,
                message,
            },
            source => GenerationError::Transport {
                stage: stage.to_string(),
                source,
            },
        }
    }

    /// Display name of the stage the run stopped in.
    pub fn stage(&self) -> Option<&str> {
        match self {
            GenerationError::Submission { stage, .. }
            | GenerationError::Transport { stage, .. }
            | GenerationError::JobFailed { stage, .. }
            | GenerationError::Timeout { stage, .. }
            | GenerationError::Cancelled { stage }
            | GenerationError::MissingArtifact { stage }
            | GenerationError::Payload { stage, .. } => Some(stage),
            GenerationError::EmptyPipeline => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, GenerationError::Cancelled { .. })
    }
}

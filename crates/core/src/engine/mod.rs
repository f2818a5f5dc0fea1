//! Generation execution engine.
//!
//! The GenerationEngine runs a list of stages strictly in order. Each stage
//! submits a payload, polls its job to a terminal state and hands the
//! resulting artifact to the next stage. Progress is reported as IPC events
//! through an [`EventSink`].

pub mod error;
pub mod stages;

pub use error::GenerationError;
pub use stages::{
    default_stages, GenerationRequest, ImageStagePayload, StageDescriptor, StageInput,
    StagePayload, VideoStagePayload,
};

use crate::api::GenerationApi;
use crate::poller::{JobPoller, PollConfig, ProgressObserver, ProgressUpdate};
use async_trait::async_trait;
use fr_protocol::ipc::Event;
use fr_protocol::job_models::{Job, JobResult};
use std::sync::Arc;
use tokio::sync::mpsc::Sender;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Destination for events produced during a run.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: Event);
}

#[async_trait]
impl EventSink for Sender<Event> {
    async fn emit(&self, event: Event) {
        // A closed receiver means nobody is listening anymore.
        let _ = self.send(event).await;
    }
}

/// Artifact produced by one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageArtifact {
    pub stage: String,
    pub artifact: String,
}

/// Artifacts of a successful run, in stage order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationOutput {
    pub artifacts: Vec<StageArtifact>,
}

impl GenerationOutput {
    pub fn artifact(&self, stage: &str) -> Option<&str> {
        self.artifacts
            .iter()
            .find(|a| a.stage == stage)
            .map(|a| a.artifact.as_str())
    }

    /// Artifact of the last stage.
    pub fn final_artifact(&self) -> Option<&str> {
        self.artifacts.last().map(|a| a.artifact.as_str())
    }
}

/// Turns poller progress into `GenerationProgress` events.
struct StageProgress<'a> {
    session_id: Uuid,
    stage: &'a str,
    sink: &'a dyn EventSink,
}

#[async_trait]
impl ProgressObserver for StageProgress<'_> {
    async fn on_progress(&self, update: ProgressUpdate) {
        self.sink
            .emit(Event::GenerationProgress {
                session_id: self.session_id,
                stage: self.stage.to_string(),
                attempt: update.attempt,
                message: update.message,
            })
            .await;
    }
}

/// Runs generation pipelines against a backend.
pub struct GenerationEngine {
    api: Arc<dyn GenerationApi>,
    poller: JobPoller,
}

impl GenerationEngine {
    pub fn new(api: Arc<dyn GenerationApi>, poll_config: PollConfig) -> Self {
        let poller = JobPoller::new(api.clone(), poll_config);
        Self { api, poller }
    }

    pub fn api(&self) -> &Arc<dyn GenerationApi> {
        &self.api
    }

    pub fn poll_config(&self) -> PollConfig {
        self.poller.config()
    }

    /// Execute `stages` in order for one session.
    ///
    /// For every stage the engine emits `LoadingMessage`, submits the
    /// payload, emits `StageStarted`, polls the job (emitting
    /// `GenerationProgress` per pending attempt) and emits `StageCompleted`.
    /// The first failure ends the run; later stages are never submitted.
    ///
    /// Terminal session events (`GenerationCompleted`, `GenerationFailed`)
    /// are left to the caller, which owns the session state.
    ///
    /// # Errors
    ///
    /// Returns the [`GenerationError`] of the first stage that did not
    /// produce an artifact, or [`GenerationError::EmptyPipeline`].
    pub async fn run(
        &self,
        session_id: Uuid,
        request: &GenerationRequest,
        stages: &[StageDescriptor],
        sink: &dyn EventSink,
        cancel: &CancellationToken,
    ) -> Result<GenerationOutput, GenerationError> {
        if stages.is_empty() {
            return Err(GenerationError::EmptyPipeline);
        }

        let mut output = GenerationOutput::default();

        for stage in stages {
            if cancel.is_cancelled() {
                return Err(GenerationError::Cancelled {
                    stage: stage.display_name.clone(),
                });
            }

            sink.emit(Event::LoadingMessage {
                session_id,
                message: stage.loading_message.clone(),
            })
            .await;

            let previous_artifact = output.final_artifact().map(str::to_string);
            let payload = stage.payload.build(&StageInput {
                stage: &stage.display_name,
                request,
                previous_artifact: previous_artifact.as_deref(),
            })?;

            tracing::info!(%session_id, stage = %stage.name, path = %stage.submit_path, "Submitting stage");

            let response = tokio::select! {
                _ = cancel.cancelled() => {
                    return Err(GenerationError::Cancelled {
                        stage: stage.display_name.clone(),
                    });
                }
                response = self.api.submit(&stage.submit_path, &payload) => response,
            };
            let submitted =
                response.map_err(|e| GenerationError::from_submission(&stage.display_name, e))?;

            tracing::info!(%session_id, stage = %stage.name, job_id = %submitted.job_id, "Stage accepted");

            sink.emit(Event::StageStarted {
                session_id,
                stage: stage.name.clone(),
                job_id: submitted.job_id.clone(),
            })
            .await;

            let job = Job::new(submitted.job_id, stage.status_path.clone());
            let progress = StageProgress {
                session_id,
                stage: &stage.name,
                sink,
            };

            let artifact = match self
                .poller
                .poll(&job, &stage.progress_label, &progress, cancel)
                .await
            {
                JobResult::Completed { artifact } => artifact,
                JobResult::Failed { reason } => {
                    return Err(GenerationError::JobFailed {
                        stage: stage.display_name.clone(),
                        reason,
                    });
                }
                JobResult::TimedOut { attempts } => {
                    return Err(GenerationError::Timeout {
                        stage: stage.display_name.clone(),
                        attempts,
                    });
                }
                JobResult::Cancelled => {
                    return Err(GenerationError::Cancelled {
                        stage: stage.display_name.clone(),
                    });
                }
            };

            sink.emit(Event::StageCompleted {
                session_id,
                stage: stage.name.clone(),
                artifact: artifact.clone(),
            })
            .await;

            output.artifacts.push(StageArtifact {
                stage: stage.name.clone(),
                artifact,
            });
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiCall, ScriptedGenerationApi, ScriptedReply};
    use crate::apparel::ApparelOutfit;
    use fr_protocol::config_models::GlobalConfig;
    use fr_protocol::job_models::JobStatusResponse;
    use fr_protocol::wizard_models::{Gender, Selections};
    use tokio::sync::mpsc;

    fn request() -> GenerationRequest {
        GenerationRequest {
            person_image: "data:image/jpeg;base64,AAAA".to_string(),
            gender: Gender::Male,
            selections: Selections::new("Blue T-Shirt", "Black Jeans", "Studio"),
            outfit: ApparelOutfit {
                outfit_top: "Blue T-Shirt".to_string(),
                outfit_bottom: "Black Jeans".to_string(),
                apparel_type: "Blue T-Shirt with Black Jeans".to_string(),
            },
        }
    }

    fn engine(api: Arc<ScriptedGenerationApi>) -> GenerationEngine {
        GenerationEngine::new(api, PollConfig::default())
    }

    fn drain(rx: &mut mpsc::Receiver<Event>) -> Vec<Event> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    fn happy_api() -> ScriptedGenerationApi {
        ScriptedGenerationApi::new()
            .on_submit("/api/generate", "img-1")
            .on_status(
                "/api/status/img-1",
                vec![
                    ScriptedReply::Status(JobStatusResponse::pending("processing")),
                    ScriptedReply::Status(JobStatusResponse::completed_image("portrait.png")),
                ],
            )
            .on_submit("/api/video", "vid-1")
            .on_status(
                "/api/video/status/vid-1",
                vec![ScriptedReply::Status(JobStatusResponse::completed_video(
                    "clip.mp4",
                ))],
            )
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_chains_image_artifact_into_video_stage() {
        let api = Arc::new(happy_api());
        let (tx, mut rx) = mpsc::channel(100);
        let stages = default_stages(&GlobalConfig::default());

        let output = engine(api.clone())
            .run(Uuid::new_v4(), &request(), &stages, &tx, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(output.artifact("image"), Some("portrait.png"));
        assert_eq!(output.final_artifact(), Some("clip.mp4"));

        let video_payloads = api.submitted_payloads("/api/video");
        assert_eq!(video_payloads.len(), 1);
        assert_eq!(video_payloads[0]["image_file"], "portrait.png");

        let events = drain(&mut rx);
        assert!(matches!(&events[0], Event::LoadingMessage { message, .. } if message == "Creating photorealistic portrait..."));
        assert!(matches!(&events[1], Event::StageStarted { job_id, .. } if job_id == "img-1"));
        assert!(matches!(&events[2], Event::GenerationProgress { message, attempt: 1, .. } if message == "Creating... (1s)"));
        assert!(matches!(&events[3], Event::StageCompleted { artifact, .. } if artifact == "portrait.png"));
        assert!(matches!(&events[4], Event::LoadingMessage { message, .. } if message == "Generating video animation..."));
    }

    #[tokio::test(start_paused = true)]
    async fn test_image_failure_never_submits_video() {
        let api = Arc::new(
            ScriptedGenerationApi::new()
                .on_submit("/api/generate", "img-1")
                .on_status(
                    "/api/status/img-1",
                    vec![ScriptedReply::Status(JobStatusResponse::failed(Some(
                        "No person detected",
                    )))],
                )
                .on_submit("/api/video", "vid-1"),
        );
        let (tx, _rx) = mpsc::channel(100);
        let stages = default_stages(&GlobalConfig::default());

        let err = engine(api.clone())
            .run(Uuid::new_v4(), &request(), &stages, &tx, &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, GenerationError::JobFailed { ref reason, .. } if reason == "No person detected"));
        assert!(api.submitted_payloads("/api/video").is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_submission_reports_stage_and_status() {
        let api = Arc::new(ScriptedGenerationApi::new().on_submit_error(
            "/api/generate",
            500,
            "GPU unavailable",
        ));
        let (tx, _rx) = mpsc::channel(100);
        let stages = default_stages(&GlobalConfig::default());

        let err = engine(api.clone())
            .run(Uuid::new_v4(), &request(), &stages, &tx, &CancellationToken::new())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Image generation failed: 500 - GPU unavailable");
        assert!(!api
            .calls()
            .iter()
            .any(|call| matches!(call, ApiCall::Status { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_before_run_submits_nothing() {
        let api = Arc::new(happy_api());
        let (tx, _rx) = mpsc::channel(100);
        let stages = default_stages(&GlobalConfig::default());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = engine(api.clone())
            .run(Uuid::new_v4(), &request(), &stages, &tx, &cancel)
            .await
            .unwrap_err();

        assert!(err.is_cancelled());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_pipeline_is_an_error() {
        let api = Arc::new(ScriptedGenerationApi::new());
        let (tx, _rx) = mpsc::channel(100);

        let err = engine(api)
            .run(Uuid::new_v4(), &request(), &[], &tx, &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, GenerationError::EmptyPipeline));
    }
}

//! Stage descriptors for the generation pipeline.
//!
//! A stage is one submit-then-poll round trip against the backend. Stages
//! run in order and each may consume the artifact of the stage before it.

use super::error::GenerationError;
use crate::apparel::{motion_description, ApparelOutfit};
use fr_protocol::config_models::GlobalConfig;
use fr_protocol::request_models::{ImageGenerationRequest, VideoGenerationRequest};
use fr_protocol::wizard_models::{Gender, Selections};
use std::sync::Arc;

/// Everything a run needs to build stage payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Captured photo as a `data:` URL.
    pub person_image: String,
    pub gender: Gender,
    pub selections: Selections,
    /// Garment fields after full-outfit shaping.
    pub outfit: ApparelOutfit,
}

/// Inputs available to a stage when its payload is built.
#[derive(Debug, Clone, Copy)]
pub struct StageInput<'a> {
    /// Display name of the stage being built.
    pub stage: &'a str,
    pub request: &'a GenerationRequest,
    /// Artifact produced by the previous stage, if any.
    pub previous_artifact: Option<&'a str>,
}

/// Builds the JSON body submitted for one stage.
pub trait StagePayload: Send + Sync {
    fn build(&self, input: &StageInput<'_>) -> Result<serde_json::Value, GenerationError>;
}

/// One step of the pipeline.
#[derive(Clone)]
pub struct StageDescriptor {
    /// Machine name used in events, e.g. `"image"`.
    pub name: String,
    /// Human name used in error messages, e.g. `"Image"`.
    pub display_name: String,
    pub submit_path: String,
    /// Status endpoint; the job id is appended as a path segment.
    pub status_path: String,
    /// Headline shown when the stage starts.
    pub loading_message: String,
    /// Prefix of the per-attempt progress message.
    pub progress_label: String,
    pub payload: Arc<dyn StagePayload>,
}

impl std::fmt::Debug for StageDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StageDescriptor")
            .field("name", &self.name)
            .field("submit_path", &self.submit_path)
            .field("status_path", &self.status_path)
            .finish_non_exhaustive()
    }
}

fn to_json<T: serde::Serialize>(stage: &str, body: &T) -> Result<serde_json::Value, GenerationError> {
    serde_json::to_value(body).map_err(|source| GenerationError::Payload {
        stage: stage.to_string(),
        source,
    })
}

/// Portrait stage: photo plus outfit and background.
pub struct ImageStagePayload {
    pub environment: String,
}

impl StagePayload for ImageStagePayload {
    fn build(&self, input: &StageInput<'_>) -> Result<serde_json::Value, GenerationError> {
        let request = input.request;
        let body = ImageGenerationRequest {
            person_image: request.person_image.clone(),
            gender: request.gender.as_str().to_string(),
            outfit_top: request.outfit.outfit_top.clone(),
            outfit_bottom: request.outfit.outfit_bottom.clone(),
            background: request.selections.background.clone(),
            environment: self.environment.clone(),
        };
        to_json(input.stage, &body)
    }
}

/// Animation stage: turns the portrait into a short turnaround clip.
///
/// Garments are sent as selected. Full-outfit shaping only applies to the
/// portrait.
pub struct VideoStagePayload {
    pub model: String,
    pub duration_sec: u32,
}

impl StagePayload for VideoStagePayload {
    fn build(&self, input: &StageInput<'_>) -> Result<serde_json::Value, GenerationError> {
        let image_file = input
            .previous_artifact
            .filter(|artifact| !artifact.is_empty())
            .ok_or_else(|| GenerationError::MissingArtifact {
                stage: input.stage.to_string(),
            })?;

        let request = input.request;
        let body = VideoGenerationRequest {
            image_file: image_file.to_string(),
            gender: request.gender.as_str().to_string(),
            outfit_top: request.selections.top.clone(),
            outfit_bottom: request.selections.bottom.clone(),
            motion_description: motion_description(request.gender).to_string(),
            model: self.model.clone(),
            duration_sec: self.duration_sec,
        };
        to_json(input.stage, &body)
    }
}

/// The image then video pipeline, configured from `config`.
pub fn default_stages(config: &GlobalConfig) -> Vec<StageDescriptor> {
    vec![
        StageDescriptor {
            name: "image".to_string(),
            display_name: "Image".to_string(),
            submit_path: config.endpoints.generate.clone(),
            status_path: config.endpoints.image_status.clone(),
            loading_message: "Creating photorealistic portrait...".to_string(),
            progress_label: "Creating...".to_string(),
            payload: Arc::new(ImageStagePayload {
                environment: config.generation.environment.clone(),
            }),
        },
        StageDescriptor {
            name: "video".to_string(),
            display_name: "Video".to_string(),
            submit_path: config.endpoints.video.clone(),
            status_path: config.endpoints.video_status.clone(),
            loading_message: "Generating video animation...".to_string(),
            progress_label: "Rendering video...".to_string(),
            payload: Arc::new(VideoStagePayload {
                model: config.generation.video_model.clone(),
                duration_sec: config.generation.video_duration_sec,
            }),
        },
    ]
}

//! Submission bodies for the generation backend.
//!
//! Field names are part of the backend contract and must not be renamed.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// `POST /api/generate` body.
///
/// # Example
///
/// ```json
/// {
///   "person_image": "data:image/jpeg;base64,...",
///   "gender": "female",
///   "outfit_top": "Formal Dress",
///   "outfit_bottom": "",
///   "background": "Office",
///   "environment": "professional lighting, studio"
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct ImageGenerationRequest {
    /// Captured photo as a `data:` URL.
    pub person_image: String,
    pub gender: String,
    pub outfit_top: String,
    pub outfit_bottom: String,
    pub background: String,
    /// Free-form lighting and setting cues.
    pub environment: String,
}

/// `POST /api/video` body.
///
/// `image_file` is the artifact reference produced by the image stage.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct VideoGenerationRequest {
    pub image_file: String,
    pub gender: String,
    pub outfit_top: String,
    pub outfit_bottom: String,
    pub motion_description: String,
    /// Backend video model name, e.g. `"grok"`.
    pub model: String,
    pub duration_sec: u32,
}

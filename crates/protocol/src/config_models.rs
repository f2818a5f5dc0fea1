//! Global configuration models for `.fitting-room/config.toml`.
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! configuration that talks to a backend on `localhost:5000`.

use serde::Deserialize;
use serde::Serialize;
use ts_rs::TS;

use crate::catalog_models::Background;

/// Represents global settings from `.fitting-room/config.toml`.
///
/// # Example
///
/// ```toml
/// # .fitting-room/config.toml
/// api_base_url = "http://localhost:5000"
/// gender_select = true
///
/// [polling]
/// interval_ms = 1000
/// max_attempts = 180
///
/// [generation]
/// video_model = "grok"
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct GlobalConfig {
    /// Base URL of the generation backend.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Show the gender selection step after capture.
    ///
    /// When disabled the wizard goes straight to selection with the
    /// default catalog variant.
    #[serde(default = "default_true")]
    pub gender_select: bool,

    #[serde(default)]
    pub polling: PollingConfig,

    #[serde(default)]
    pub generation: GenerationConfig,

    #[serde(default)]
    pub endpoints: EndpointConfig,

    #[serde(default = "default_backgrounds")]
    pub backgrounds: Vec<Background>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            gender_select: true,
            polling: PollingConfig::default(),
            generation: GenerationConfig::default(),
            endpoints: EndpointConfig::default(),
            backgrounds: default_backgrounds(),
        }
    }
}

/// Fixed-interval polling parameters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct PollingConfig {
    /// Delay between two status queries, in milliseconds.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Maximum number of status queries per job.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            max_attempts: default_max_attempts(),
        }
    }
}

/// Values sent to the backend that the user does not choose.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct GenerationConfig {
    #[serde(default = "default_environment")]
    pub environment: String,

    #[serde(default = "default_video_model")]
    pub video_model: String,

    #[serde(default = "default_video_duration_sec")]
    pub video_duration_sec: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            video_model: default_video_model(),
            video_duration_sec: default_video_duration_sec(),
        }
    }
}

/// Backend routes, relative to `api_base_url` unless absolute.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct EndpointConfig {
    #[serde(default = "default_generate_path")]
    pub generate: String,

    #[serde(default = "default_image_status_path")]
    pub image_status: String,

    #[serde(default = "default_video_path")]
    pub video: String,

    #[serde(default = "default_video_status_path")]
    pub video_status: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            generate: default_generate_path(),
            image_status: default_image_status_path(),
            video: default_video_path(),
            video_status: default_video_status_path(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_api_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_interval_ms() -> u64 {
    1000
}

fn default_max_attempts() -> u32 {
    180
}

fn default_environment() -> String {
    "professional lighting, studio".to_string()
}

fn default_video_model() -> String {
    "grok".to_string()
}

fn default_video_duration_sec() -> u32 {
    4
}

fn default_generate_path() -> String {
    "/api/generate".to_string()
}

fn default_image_status_path() -> String {
    "/api/status".to_string()
}

fn default_video_path() -> String {
    "/api/video".to_string()
}

fn default_video_status_path() -> String {
    "/api/video/status".to_string()
}

fn default_backgrounds() -> Vec<Background> {
    [
        ("Urban Cafe", "Modern outdoor coffee shop"),
        ("Office", "Professional corporate environment"),
        ("Gym", "Fitness studio setting"),
        ("Studio", "Clean professional studio"),
    ]
    .into_iter()
    .map(|(name, description)| Background {
        name: name.to_string(),
        description: description.to_string(),
    })
    .collect()
}

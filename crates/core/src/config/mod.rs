//! Configuration loading and management.
//!
//! This module loads the global settings and the outfit catalog from the
//! `.fitting-room/` directory structure.

pub mod error;
pub mod loader;
pub mod models;

pub use error::{ConfigError, ConfigResult};
pub use loader::{apply_overrides, builtin_catalog, load_config, validate_global_config};
pub use models::AppConfig;

/// Name of the project configuration directory.
pub const FITTING_ROOM_DIR: &str = ".fitting-room";

/// Environment variable overriding `api_base_url`.
pub const API_URL_ENV: &str = "FITTING_ROOM_API_URL";

/// Video models the backend accepts.
pub const KNOWN_VIDEO_MODELS: [&str; 8] = [
    "veo3", "ltx", "kling", "grok", "luma", "pika", "seedance", "hunyuan",
];

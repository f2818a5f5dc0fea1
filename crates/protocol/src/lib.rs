//! # fr-protocol
//!
//! Core protocol definitions and data models for fitting-room.
//!
//! This crate defines all shared data structures used for:
//! - Configuration file parsing (TOML settings, YAML catalog)
//! - Wizard session state
//! - Generation backend request and response bodies
//! - Communication between a front end and Core
//!
//! ## Modules
//!
//! - [`catalog_models`]: Outfit and background catalog entries
//! - [`config_models`]: Global configuration from config.toml
//! - [`job_models`]: Generation jobs, status bodies and poll outcomes
//! - [`request_models`]: Submission bodies for the image and video stages
//! - [`wizard_models`]: Wizard steps, selections and session state
//! - [`ipc`]: Operations and Events for front end ↔ Core communication
//!
//! ## Design Principles
//!
//! - Minimal dependencies: Only serde, ts-rs, uuid and chrono
//! - TypeScript generation: All types derive `TS` for the browser client
//! - Independent compilation: No dependencies on other fitting-room crates

pub mod catalog_models;
pub mod config_models;
pub mod ipc;
pub mod job_models;
pub mod request_models;
pub mod wizard_models;

// Re-export all public types for convenience
pub use catalog_models::*;
pub use config_models::*;
pub use ipc::*;
pub use job_models::*;
pub use request_models::*;
pub use wizard_models::*;

//! # fr-core
//!
//! Generation orchestration for the fitting-room wizard.
//!
//! This crate provides:
//! - A generation backend client behind the `GenerationApi` trait
//! - The fixed-interval job poller with cancellation
//! - The sequential stage engine (image, then video)
//! - The wizard session state machine and its manager
//! - Camera stream ownership and photo loading
//! - Configuration loading from the `.fitting-room/` directory
//!
//! ## Modules
//!
//! - [`api`]: Backend client trait, HTTP and scripted adapters
//! - [`poller`]: Job polling
//! - [`engine`]: Stage execution
//! - [`session`]: Wizard state machine and manager
//! - [`apparel`]: Outfit shaping before submission
//! - [`catalog`]: Outfit catalog and selection validation
//! - [`camera`]: Capture streams and captured images
//! - [`config`]: Configuration loading and management
//! - [`init`]: `.fitting-room/` scaffolding

pub mod api;
pub mod apparel;
pub mod camera;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod init;
pub mod poller;
pub mod session;

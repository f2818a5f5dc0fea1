//! Generation backend client.
//!
//! This module provides the `GenerationApi` trait (Adapter Pattern) with an
//! HTTP implementation for the real backend and a scripted one for tests.

pub mod base;
pub mod http;
pub mod scripted;

pub use base::{ApiError, GenerationApi};
pub use http::HttpGenerationApi;
pub use scripted::{ApiCall, ScriptedGenerationApi, ScriptedReply};

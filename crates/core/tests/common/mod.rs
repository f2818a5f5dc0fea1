//! Common test utilities for integration tests.
//!
//! This module provides shared functionality across all integration tests:
//! - Test fixtures (scripted backends, sample selections, project dirs)
//! - Event assertions
//! - An in-process HTTP generation backend

pub mod assertions;
pub mod fake_backend;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fake_backend::*;
#[allow(unused_imports)]
pub use fixtures::*;

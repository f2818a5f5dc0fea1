//! Wizard session management.
//!
//! This module provides:
//! - Session state machine transitions
//! - SessionManager for dispatching operations and running generation

pub mod error;
pub mod manager;
pub mod process;

pub use error::{SessionError, SessionResult};
pub use manager::SessionManager;

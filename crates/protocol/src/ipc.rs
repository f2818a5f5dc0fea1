//! Inter-process communication protocol.
//!
//! This module defines the message types for asynchronous communication
//! between a front end (browser UI, terminal driver) and the Core.
//!
//! The protocol follows an Operation/Event pattern:
//! - `Op`: User actions sent from the front end to Core
//! - `Event`: State changes and progress sent from Core to the front end
//!
//! Communication is channel-based, so the front end stays responsive while
//! generation jobs are being polled.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::wizard_models::{Gender, Selections, WizardSession, WizardStep};

/// Operations sent from the front end to the Core.
///
/// Uses tagged enum serialization for TypeScript compatibility:
/// ```json
/// {
///   "type": "selectGender",
///   "payload": { "gender": "female" }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Op {
    /// A photo was captured.
    CapturePhoto {
        /// The frame as a `data:` URL.
        image: String,
    },

    /// The user picked a catalog variant.
    SelectGender { gender: Gender },

    /// The user confirmed their choices; generation should start.
    FinalizeSelections { selections: Selections },

    /// Start over from the capture screen.
    ///
    /// Any generation in flight is cancelled.
    Restart,

    /// Request a snapshot of the session.
    GetSessionState,

    /// Shut down gracefully, cancelling any generation in flight.
    Shutdown,
}

/// Events sent from the Core to the front end.
///
/// ```json
/// {
///   "type": "generationProgress",
///   "payload": {
///     "session_id": "uuid-here",
///     "stage": "image",
///     "attempt": 3,
///     "message": "Creating... (3s)"
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Event {
    /// The wizard moved to another step.
    StepChanged {
        #[ts(type = "string")]
        session_id: Uuid,
        step: WizardStep,
    },

    /// The loading screen headline changed.
    LoadingMessage {
        #[ts(type = "string")]
        session_id: Uuid,
        message: String,
    },

    /// A stage's submission was accepted and its job is being polled.
    StageStarted {
        #[ts(type = "string")]
        session_id: Uuid,
        stage: String,
        job_id: String,
    },

    /// A job is still pending.
    GenerationProgress {
        #[ts(type = "string")]
        session_id: Uuid,
        stage: String,
        attempt: u32,
        message: String,
    },

    /// A stage produced its artifact.
    StageCompleted {
        #[ts(type = "string")]
        session_id: Uuid,
        stage: String,
        artifact: String,
    },

    /// Every stage succeeded; `video` is the final artifact reference.
    GenerationCompleted {
        #[ts(type = "string")]
        session_id: Uuid,
        video: String,
    },

    /// A stage failed; the wizard is back on the select screen.
    GenerationFailed {
        #[ts(type = "string")]
        session_id: Uuid,
        error: String,
    },

    /// A generation in flight was abandoned by a restart or shutdown.
    GenerationCancelled {
        #[ts(type = "string")]
        session_id: Uuid,
    },

    /// The session was reset to the capture screen.
    SessionRestarted {
        #[ts(type = "string")]
        session_id: Uuid,
    },

    /// Snapshot requested with `Op::GetSessionState`.
    SessionState { session: WizardSession },
}

impl Event {
    /// Session the event belongs to.
    pub fn session_id(&self) -> Uuid {
        match self {
            Event::StepChanged { session_id, .. }
            | Event::LoadingMessage { session_id, .. }
            | Event::StageStarted { session_id, .. }
            | Event::GenerationProgress { session_id, .. }
            | Event::StageCompleted { session_id, .. }
            | Event::GenerationCompleted { session_id, .. }
            | Event::GenerationFailed { session_id, .. }
            | Event::GenerationCancelled { session_id }
            | Event::SessionRestarted { session_id } => *session_id,
            Event::SessionState { session } => session.id,
        }
    }
}

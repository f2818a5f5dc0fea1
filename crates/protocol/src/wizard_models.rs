//! Wizard session state models.
//!
//! This module defines the structures for tracking where a user is in the
//! capture → select → generate flow and what they have supplied so far.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// The screen the wizard is currently showing.
///
/// The step advances strictly forward during normal use:
/// Capture -> GenderSelect -> Select -> Loading -> Result
///
/// A failed generation reverts from Loading back to Select, and a restart
/// returns to Capture from anywhere.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WizardStep {
    /// Waiting for a photo of the user.
    Capture,

    /// Waiting for the user to pick a gender variant of the catalog.
    ///
    /// Skipped when gender selection is disabled in the configuration.
    GenderSelect,

    /// Waiting for top, bottom and background choices.
    Select,

    /// Generation stages are running.
    Loading,

    /// The final video is available.
    Result,
}

impl WizardStep {
    /// Every step, in wizard order.
    pub const ALL: [WizardStep; 5] = [
        WizardStep::Capture,
        WizardStep::GenderSelect,
        WizardStep::Select,
        WizardStep::Loading,
        WizardStep::Result,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WizardStep::Capture => "CAPTURE",
            WizardStep::GenderSelect => "GENDER_SELECT",
            WizardStep::Select => "SELECT",
            WizardStep::Loading => "LOADING",
            WizardStep::Result => "RESULT",
        }
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which catalog variant the user is shopping from.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, TS)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    /// Wire representation used by the generation backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            other => Err(format!("unknown gender '{other}', expected 'male' or 'female'")),
        }
    }
}

/// The three named slots a user fills in on the select screen.
///
/// An empty string means the slot has not been chosen.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, TS)]
pub struct Selections {
    pub top: String,
    pub bottom: String,
    pub background: String,
}

impl Selections {
    pub fn new(
        top: impl Into<String>,
        bottom: impl Into<String>,
        background: impl Into<String>,
    ) -> Self {
        Self {
            top: top.into(),
            bottom: bottom.into(),
            background: background.into(),
        }
    }

    /// Names of the slots that are still empty.
    pub fn missing_slots(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.top.is_empty() {
            missing.push("top");
        }
        if self.bottom.is_empty() {
            missing.push("bottom");
        }
        if self.background.is_empty() {
            missing.push("background");
        }
        missing
    }
}

/// In-memory state of a single wizard session.
///
/// There is no persistence: a session lives as long as the process that
/// owns it, and a restart clears everything except the session id.
#[derive(Serialize, Deserialize, Debug, Clone, TS)]
pub struct WizardSession {
    /// Unique identifier for this session.
    #[ts(type = "string")]
    pub id: Uuid,

    /// The step currently shown to the user.
    pub step: WizardStep,

    /// Catalog variant in use.
    pub gender: Gender,

    /// Captured photo as a `data:` URL.
    pub person_image: Option<String>,

    /// Choices submitted for generation.
    ///
    /// Kept after a failed generation so the user can retry without
    /// recapturing the photo.
    pub selections: Option<Selections>,

    /// Artifact reference produced by the image stage.
    pub generated_image: Option<String>,

    /// Artifact reference produced by the video stage.
    pub generated_video: Option<String>,

    /// Human-readable label shown on the loading screen.
    pub loading_message: String,

    /// Error from the most recent failed generation.
    pub last_error: Option<String>,

    /// When the current generation run was started.
    #[ts(type = "string | null")]
    pub started_at: Option<DateTime<Utc>>,

    /// When the current generation run finished successfully.
    #[ts(type = "string | null")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Loading screen text before any stage has reported in.
pub const DEFAULT_LOADING_MESSAGE: &str = "Generating your content...";

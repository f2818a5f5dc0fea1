use crate::catalog::CatalogError;
use fr_protocol::wizard_models::WizardStep;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Cannot {action} while on the {from} step")]
    InvalidTransition {
        from: WizardStep,
        action: &'static str,
    },

    #[error(transparent)]
    UnknownOption(#[from] CatalogError),

    #[error("No photo has been captured")]
    MissingPhoto,

    #[error("Generation finished without a final artifact")]
    MissingArtifact,
}

pub type SessionResult<T> = std::result::Result<T, SessionError>;

//! Errors raised while loading `.fitting-room/`.
//!
//! Every variant carries the offending path so the CLI can point at the
//! file to fix. Embedded catalog entries report a `<builtin>/...` path.

use fr_protocol::wizard_models::Gender;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// `config.toml` or a catalog file exists but could not be read.
    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// `config.toml` is not valid TOML or has fields of the wrong type.
    #[error("Failed to parse settings in {path}: {source}")]
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A catalog file does not describe a gender with tops and bottoms.
    #[error("Failed to parse outfit catalog {path}: {source}")]
    YamlParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Failed to list outfit catalogs in {path}: {source}")]
    DirectoryWalk {
        path: PathBuf,
        source: walkdir::Error,
    },

    /// Two catalog files claim the same gender.
    #[error("Outfit catalog {path} repeats the {gender} catalog already loaded from {first}")]
    DuplicateCatalog {
        gender: Gender,
        path: PathBuf,
        first: PathBuf,
    },

    /// Settings parsed but cannot drive the poller or the backend, e.g. a
    /// zero poll interval or an unknown video model.
    #[error("Invalid settings in {path}: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

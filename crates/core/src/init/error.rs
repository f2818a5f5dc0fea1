//! Errors from scaffolding a `.fitting-room/` directory.

use std::path::PathBuf;
use thiserror::Error;

pub type InitResult<T> = Result<T, InitError>;

#[derive(Debug, Error)]
pub enum InitError {
    /// `.fitting-room/` is already there and `force` was not given.
    #[error(".fitting-room already exists at {0:?}. Use --force to overwrite.")]
    DirectoryExists(PathBuf),

    /// A settings or catalog template is missing from the binary.
    #[error("Embedded template missing: {0}")]
    TemplateNotFound(String),

    /// `.fitting-room/` or `.fitting-room/catalog/` could not be created.
    #[error("Failed to create {path:?}: {source}")]
    DirectoryCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    /// `config.toml` or a catalog file could not be written.
    #[error("Failed to write {path:?}: {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}

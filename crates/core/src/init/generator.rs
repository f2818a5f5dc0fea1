//! Directory structure and file generation for .fitting-room initialization.

use super::error::{InitError, InitResult};
use super::templates::{get_template, list_templates};
use crate::config::FITTING_ROOM_DIR;
use std::fs;
use std::path::{Path, PathBuf};

/// Options for initializing a .fitting-room directory.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Target directory where .fitting-room will be created.
    pub target_dir: PathBuf,

    /// Overwrite existing .fitting-room directory if it exists.
    pub force: bool,

    /// Write `config.toml` only and rely on the built-in catalog.
    pub minimal: bool,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            target_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            force: false,
            minimal: false,
        }
    }
}

/// Generate a .fitting-room directory with templates.
///
/// ```text
/// .fitting-room/
/// ├── config.toml
/// └── catalog/          (unless minimal)
///     ├── female.yaml
///     └── male.yaml
/// ```
///
/// Returns the paths written, relative to the `.fitting-room` directory.
///
/// # Errors
///
/// Returns an `InitError` if the directory already exists without `force`,
/// a template is missing, or a file system operation fails.
pub async fn generate_fitting_room_structure(options: InitOptions) -> InitResult<Vec<String>> {
    let fr_dir = options.target_dir.join(FITTING_ROOM_DIR);

    if fr_dir.exists() && !options.force {
        return Err(InitError::DirectoryExists(fr_dir));
    }

    fs::create_dir_all(&fr_dir).map_err(|source| InitError::DirectoryCreate {
        path: fr_dir.clone(),
        source,
    })?;

    let mut written = vec!["config.toml".to_string()];
    if !options.minimal {
        written.extend(list_templates("catalog/"));
    }

    for template_path in &written {
        write_template_file(&fr_dir, template_path)?;
    }

    tracing::info!(dir = %fr_dir.display(), files = written.len(), "Initialized fitting room");
    Ok(written)
}

fn write_template_file(fr_dir: &Path, template_path: &str) -> InitResult<()> {
    let content = get_template(template_path)
        .ok_or_else(|| InitError::TemplateNotFound(template_path.to_string()))?;

    let target_path = fr_dir.join(template_path);

    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent).map_err(|source| InitError::DirectoryCreate {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(&target_path, content).map_err(|source| InitError::FileWrite {
        path: target_path,
        source,
    })?;

    Ok(())
}

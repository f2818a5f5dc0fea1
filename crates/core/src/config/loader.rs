//! Configuration file loader for `.fitting-room/` directory structure.
//!
//! This module loads:
//! - `config.toml`: Global settings
//! - `catalog/*.yaml`: One garment catalog per gender
//!
//! Missing files fall back to defaults: the default `GlobalConfig` and the
//! catalog embedded in the binary.

use super::error::{ConfigError, ConfigResult};
use super::models::AppConfig;
use super::{API_URL_ENV, FITTING_ROOM_DIR, KNOWN_VIDEO_MODELS};
use crate::catalog::Catalog;
use crate::init::templates::{get_template, list_templates};
use fr_protocol::catalog_models::GenderCatalog;
use fr_protocol::config_models::GlobalConfig;
use fr_protocol::wizard_models::Gender;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Loads all configuration from the `.fitting-room/` directory.
///
/// A `.env` file in `root` is loaded first, so `FITTING_ROOM_API_URL` may
/// come from either the environment or that file.
///
/// # Errors
///
/// Returns `ConfigError` if a file exists but cannot be read or parsed, or
/// if the resulting settings fail validation.
pub async fn load_config(root: &Path) -> ConfigResult<AppConfig> {
    match dotenvy::from_path(root.join(".env")) {
        Ok(()) => tracing::debug!(root = %root.display(), "Loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "Ignoring unreadable .env"),
    }

    let fr_dir = root.join(FITTING_ROOM_DIR);

    let mut global = load_global_config(&fr_dir)?;
    apply_overrides(&mut global, |key| std::env::var(key).ok());
    validate_global_config(&global, &fr_dir.join("config.toml"))?;

    let genders = load_catalog(&fr_dir)?;
    let catalog = if genders.is_empty() {
        builtin_catalog(&global)?
    } else {
        Catalog::new(genders, global.backgrounds.clone())
    };

    Ok(AppConfig { global, catalog })
}

/// Apply environment overrides, looking variables up with `lookup`.
pub fn apply_overrides(global: &mut GlobalConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(url) = lookup(API_URL_ENV).filter(|url| !url.trim().is_empty()) {
        tracing::debug!(url = %url, "API base URL overridden from environment");
        global.api_base_url = url;
    }
}

/// Reject settings the poller or backend cannot work with.
pub fn validate_global_config(global: &GlobalConfig, path: &Path) -> ConfigResult<()> {
    let invalid = |reason: String| ConfigError::InvalidConfig {
        path: path.to_path_buf(),
        reason,
    };

    if global.api_base_url.trim().is_empty() {
        return Err(invalid("api_base_url must not be empty".to_string()));
    }
    if global.polling.interval_ms == 0 {
        return Err(invalid("polling.interval_ms must be greater than 0".to_string()));
    }
    if global.polling.max_attempts == 0 {
        return Err(invalid(
            "polling.max_attempts must be greater than 0".to_string(),
        ));
    }
    if !KNOWN_VIDEO_MODELS.contains(&global.generation.video_model.as_str()) {
        return Err(invalid(format!(
            "unknown video model '{}', expected one of: {}",
            global.generation.video_model,
            KNOWN_VIDEO_MODELS.join(", ")
        )));
    }
    Ok(())
}

/// The catalog embedded in the binary, with backgrounds from `global`.
pub fn builtin_catalog(global: &GlobalConfig) -> ConfigResult<Catalog> {
    let mut genders = Vec::new();
    for template_path in list_templates("catalog/") {
        let path = PathBuf::from(format!("<builtin>/{template_path}"));
        let content = get_template(&template_path).ok_or_else(|| ConfigError::InvalidConfig {
            path: path.clone(),
            reason: "embedded template missing".to_string(),
        })?;
        let catalog: GenderCatalog = serde_yaml::from_str(&content)
            .map_err(|source| ConfigError::YamlParse { path, source })?;
        genders.push(catalog);
    }
    Ok(Catalog::new(genders, global.backgrounds.clone()))
}

fn load_global_config(fr_dir: &Path) -> ConfigResult<GlobalConfig> {
    let config_path = fr_dir.join("config.toml");

    if !config_path.exists() {
        return Ok(GlobalConfig::default());
    }

    let content =
        std::fs::read_to_string(&config_path).map_err(|source| ConfigError::FileRead {
            path: config_path.clone(),
            source,
        })?;

    toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
        path: config_path,
        source,
    })
}

fn load_catalog(fr_dir: &Path) -> ConfigResult<Vec<GenderCatalog>> {
    let catalog_dir = fr_dir.join("catalog");

    if !catalog_dir.exists() {
        return Ok(Vec::new());
    }

    let mut genders: Vec<GenderCatalog> = Vec::new();
    let mut sources: HashMap<Gender, PathBuf> = HashMap::new();

    for entry in WalkDir::new(&catalog_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| ConfigError::DirectoryWalk {
            path: catalog_dir.clone(),
            source,
        })?;

        let path = entry.path();

        let ext = path.extension().and_then(|s| s.to_str());
        if ext != Some("yaml") && ext != Some("yml") {
            continue;
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog: GenderCatalog =
            serde_yaml::from_str(&content).map_err(|source| ConfigError::YamlParse {
                path: path.to_path_buf(),
                source,
            })?;

        if let Some(first) = sources.get(&catalog.gender) {
            return Err(ConfigError::DuplicateCatalog {
                gender: catalog.gender,
                path: path.to_path_buf(),
                first: first.clone(),
            });
        }

        sources.insert(catalog.gender, path.to_path_buf());
        genders.push(catalog);
    }

    Ok(genders)
}

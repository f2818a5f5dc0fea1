//! Subcommand implementations.

pub mod catalog;
pub mod generate;
pub mod init;
pub mod poll;

use color_eyre::eyre::{Result, WrapErr};
use fr_core::config::{load_config, AppConfig};
use std::path::Path;

/// Load `.fitting-room/` from `root`, with `--api-url` taking precedence
/// over both the file and `FITTING_ROOM_API_URL`.
pub(crate) async fn load_with_overrides(root: &Path, api_url: Option<String>) -> Result<AppConfig> {
    let mut config = load_config(root)
        .await
        .wrap_err_with(|| format!("Failed to load configuration from {}", root.display()))?;

    if let Some(url) = api_url.filter(|url| !url.trim().is_empty()) {
        tracing::debug!(url = %url, "API base URL overridden from command line");
        config.global.api_base_url = url;
    }
    Ok(config)
}

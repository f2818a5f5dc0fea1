//! Configuration models that aggregate all settings.

use crate::catalog::Catalog;
use fr_protocol::config_models::GlobalConfig;

/// Unified application configuration loaded from `.fitting-room/`.
///
/// - `config.toml`: Global settings, including backgrounds
/// - `catalog/*.yaml`: Garments per gender
///
/// # Example
///
/// ```rust,no_run
/// use fr_core::config::load_config;
/// use fr_protocol::wizard_models::Gender;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new(".")).await?;
/// println!("{} tops for women", config.catalog.tops(Gender::Female).len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub global: GlobalConfig,
    pub catalog: Catalog,
}

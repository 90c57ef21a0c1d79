mod config;

pub use config::{Config, DefectConfig, LayoutConfig, RouteConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Explicit configuration directory, used as-is when set.
pub const CONFIG_DIR_ENV: &str = "TRIPLINE_CONFIG_DIR";

/// Directory holding `config.toml`, created on first use.
///
/// Resolution order:
/// 1. `$TRIPLINE_CONFIG_DIR`
/// 2. `~/.config/tripline-dev/` when `TRIPLINE_ENV=dev`
/// 3. `~/.config/tripline/`
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os(CONFIG_DIR_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let name = match std::env::var("TRIPLINE_ENV").as_deref() {
                Ok("dev") => "tripline-dev",
                _ => "tripline",
            };
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config")
                .join(name)
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::LoadFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}

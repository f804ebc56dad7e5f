//! Config directory resolution.
//!
//! The config directory holds `settings.json` and, unless overridden by
//! settings, the shortcut file `shortcuts.json`.

use std::path::PathBuf;

/// Environment variable that overrides the config directory
pub const CONFIG_DIR_ENV: &str = "QUICKFILL_CONFIG_DIR";

/// Application directory name under the platform config dir
const APP_DIR_NAME: &str = "quickfill";

/// Get the config directory.
///
/// Resolution order:
/// 1. `$QUICKFILL_CONFIG_DIR` when set and non-empty
/// 2. `<platform config dir>/quickfill`
///
/// # Returns
/// The directory path, or an error message if the platform has no config dir.
pub fn get_config_dir() -> Result<PathBuf, String> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or_else(|| "Could not determine platform config directory".to_string())
}

#[cfg(test)]
#[path = "paths_test.rs"]
mod tests;

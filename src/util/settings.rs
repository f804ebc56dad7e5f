//! Application settings.
//!
//! Settings live in `settings.json` inside the config directory. Every field
//! has a default, so a missing file or a partial file is never an error.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings file name inside the config directory
pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

/// Shortcut file name used when `shortcutsFile` is not set
const DEFAULT_SHORTCUTS_FILE: &str = "shortcuts.json";

/// Error types for settings loading
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The settings file exists but could not be read
    #[error("Failed to read settings file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The settings file is not valid JSON for AppSettings
    #[error("Failed to parse settings file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Persisted application settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    /// Path to the shortcut file; relative paths resolve against the config dir
    pub shortcuts_file: Option<PathBuf>,
    /// Log level filter (e.g., "info", "debug"); `RUST_LOG` takes precedence
    pub log_level: String,
    /// Whether to also write logs to a daily file in the config dir
    pub log_to_file: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            shortcuts_file: None,
            log_level: "info".to_string(),
            log_to_file: true,
        }
    }
}

impl AppSettings {
    /// Load settings from `<config_dir>/settings.json`.
    ///
    /// Returns defaults when the file does not exist.
    pub fn load(config_dir: &Path) -> Result<Self, SettingsError> {
        let path = config_dir.join(DEFAULT_SETTINGS_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|source| SettingsError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| SettingsError::Parse { path, source })
    }

    /// Resolve the shortcut file path against the config directory
    pub fn shortcuts_path(&self, config_dir: &Path) -> PathBuf {
        match &self.shortcuts_file {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => config_dir.join(path),
            None => config_dir.join(DEFAULT_SHORTCUTS_FILE),
        }
    }

    /// Directory for rolling log files
    pub fn log_dir(&self, config_dir: &Path) -> PathBuf {
        config_dir.join("logs")
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;

//! Shared utilities for the quickfill backend.
//!
//! This module provides common functionality used across the codebase:
//! - `paths`: config directory resolution
//! - `settings`: AppSettings loaded from `settings.json`

mod paths;
mod settings;

pub use paths::{get_config_dir, CONFIG_DIR_ENV};
pub use settings::{AppSettings, SettingsError, DEFAULT_SETTINGS_FILE};

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

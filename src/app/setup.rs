//! Application setup and initialization.
//!
//! Resolves the config dir, loads settings, starts logging and opens the
//! shortcut store. Everything after logging starts degrades with a warning
//! instead of failing.

use std::path::PathBuf;

use crate::dictionary::DictionaryStore;
use crate::util::{self, AppSettings};

/// Everything the REPL needs
#[derive(Debug)]
pub struct AppContext {
    pub config_dir: PathBuf,
    pub settings: AppSettings,
    pub store: DictionaryStore,
}

/// Main application setup function.
pub fn setup() -> Result<AppContext, Box<dyn std::error::Error>> {
    let config_dir = util::get_config_dir()?;

    // Settings decide how logging starts, so a bad file is reported after init
    let (settings, settings_error) = match AppSettings::load(&config_dir) {
        Ok(settings) => (settings, None),
        Err(e) => (AppSettings::default(), Some(e)),
    };

    let log_dir = settings
        .log_to_file
        .then(|| settings.log_dir(&config_dir));
    super::logging::init_logging(&settings.log_level, log_dir.as_deref())?;

    crate::info!("Setting up quickfill (config dir {:?})", config_dir);
    if let Some(e) = settings_error {
        crate::warn!("Using default settings: {}", e);
    }

    let mut store = DictionaryStore::new(settings.shortcuts_path(&config_dir));
    if let Err(e) = store.load() {
        crate::warn!("Failed to load shortcuts, starting empty: {}", e);
    }

    Ok(AppContext {
        config_dir,
        settings,
        store,
    })
}

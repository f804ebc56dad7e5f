// Shortcut store - persists and loads shortcuts for text expansion
//
// The expansion engine only ever reads through `ShortcutStore::get`, which
// re-reads the backing file so edits from another process show up on the
// next input event. Mutation (add/update/delete) is the configuration surface.

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// A shortcut for text expansion
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Shortcut {
    /// Unique identifier for the shortcut
    pub id: String,
    /// Trigger text (e.g., "brb")
    pub trigger: String,
    /// Expansion content, a small HTML fragment that may embed `{name}` placeholders
    #[serde(alias = "expansion")]
    pub content: String,
}

impl Shortcut {
    /// Build a shortcut with a fresh id
    pub fn new(trigger: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            trigger: trigger.into(),
            content: content.into(),
        }
    }
}

/// Error types for dictionary operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DictionaryError {
    /// Entry with this ID already exists
    #[error("Entry with ID {0} already exists")]
    DuplicateId(String),
    /// Another entry already uses this trigger
    #[error("Trigger '{0}' is already defined")]
    DuplicateTrigger(String),
    /// Trigger is empty or whitespace only
    #[error("Trigger cannot be empty")]
    EmptyTrigger,
    /// Entry not found
    #[error("Entry with ID {0} not found")]
    NotFound(String),
    /// Failed to persist entries
    #[error("Failed to persist entries: {0}")]
    PersistenceError(String),
    /// Failed to load entries
    #[error("Failed to load entries: {0}")]
    LoadError(String),
}

/// Read access to the trigger -> content mapping.
///
/// Called at the start of every input event; implementations must not cache
/// across calls. Enumeration order is the order triggers are tried in.
pub trait ShortcutStore {
    fn get(&self) -> Result<Vec<Shortcut>, DictionaryError>;
}

impl ShortcutStore for Vec<Shortcut> {
    fn get(&self) -> Result<Vec<Shortcut>, DictionaryError> {
        Ok(self.clone())
    }
}

/// Store for shortcuts with file-based persistence
///
/// Entries keep insertion order, which is also the trigger scan order.
#[derive(Debug)]
pub struct DictionaryStore {
    /// Entries in insertion order
    entries: Vec<Shortcut>,
    /// Path to persistence file
    config_path: PathBuf,
}

impl DictionaryStore {
    /// Create a new store with the given config path
    pub fn new(config_path: PathBuf) -> Self {
        Self {
            entries: Vec::new(),
            config_path,
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Read entries straight from the backing file.
    /// A missing file is an empty dictionary.
    fn read_entries(path: &Path) -> Result<Vec<Shortcut>, DictionaryError> {
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content =
            fs::read_to_string(path).map_err(|e| DictionaryError::LoadError(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| DictionaryError::LoadError(e.to_string()))
    }

    /// Load entries from the persistence file
    pub fn load(&mut self) -> Result<(), DictionaryError> {
        crate::debug!("Loading shortcuts from {:?}", self.config_path);

        if !self.config_path.exists() {
            crate::debug!("No shortcut file found, starting with empty store");
            return Ok(());
        }

        self.entries = Self::read_entries(&self.config_path)?;

        crate::info!("Loaded {} shortcuts", self.entries.len());
        Ok(())
    }

    /// Persist entries to the file using atomic write (temp file + rename)
    fn save(&self, entries: &[Shortcut]) -> Result<(), DictionaryError> {
        crate::debug!(
            "Persisting {} shortcuts to {:?}",
            entries.len(),
            self.config_path
        );

        // Ensure parent directory exists
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| DictionaryError::PersistenceError(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(entries)
            .map_err(|e| DictionaryError::PersistenceError(e.to_string()))?;

        let temp_path = self.config_path.with_extension("tmp");

        {
            let mut file = File::create(&temp_path).map_err(|e| {
                DictionaryError::PersistenceError(format!("Failed to create temp file: {}", e))
            })?;
            file.write_all(content.as_bytes()).map_err(|e| {
                DictionaryError::PersistenceError(format!("Failed to write: {}", e))
            })?;
            file.sync_all().map_err(|e| {
                DictionaryError::PersistenceError(format!("Failed to sync: {}", e))
            })?;
        } // File closed here

        fs::rename(&temp_path, &self.config_path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            DictionaryError::PersistenceError(format!("Failed to rename: {}", e))
        })?;

        crate::debug!("Shortcuts persisted successfully");
        Ok(())
    }

    /// Apply `change` to the entries currently on disk and persist them.
    ///
    /// Starts from the file rather than the in-memory list so edits made by
    /// another writer since `load` are kept. Memory is only updated once the
    /// file has been written.
    fn modify<T>(
        &mut self,
        change: impl FnOnce(&mut Vec<Shortcut>) -> Result<T, DictionaryError>,
    ) -> Result<T, DictionaryError> {
        let mut entries = Self::read_entries(&self.config_path)?;
        let result = change(&mut entries)?;
        self.save(&entries)?;
        self.entries = entries;
        Ok(result)
    }

    /// List all entries in insertion order
    pub fn list(&self) -> Vec<&Shortcut> {
        self.entries.iter().collect()
    }

    /// Add a new entry to the store
    /// Generates a unique ID using UUID v4
    #[must_use = "this returns a Result that should be handled"]
    pub fn add(&mut self, trigger: String, content: String) -> Result<Shortcut, DictionaryError> {
        self.modify(|entries| {
            validate_trigger(entries, &trigger, None)?;

            let entry = Shortcut::new(trigger, content);
            if entries.iter().any(|e| e.id == entry.id) {
                return Err(DictionaryError::DuplicateId(entry.id));
            }

            entries.push(entry.clone());
            Ok(entry)
        })
    }

    /// Update an existing entry in place, keeping its position
    #[must_use = "this returns a Result that should be handled"]
    pub fn update(
        &mut self,
        id: String,
        trigger: String,
        content: String,
    ) -> Result<Shortcut, DictionaryError> {
        self.modify(|entries| {
            let index = entries
                .iter()
                .position(|e| e.id == id)
                .ok_or_else(|| DictionaryError::NotFound(id.clone()))?;
            validate_trigger(entries, &trigger, Some(&id))?;

            let entry = Shortcut {
                id,
                trigger,
                content,
            };
            entries[index] = entry.clone();
            Ok(entry)
        })
    }

    /// Delete an entry by ID
    #[must_use = "this returns a Result that should be handled"]
    pub fn delete(&mut self, id: &str) -> Result<(), DictionaryError> {
        self.modify(|entries| {
            let before = entries.len();
            entries.retain(|e| e.id != id);
            if entries.len() == before {
                return Err(DictionaryError::NotFound(id.to_string()));
            }
            Ok(())
        })
    }

    /// Get an entry by ID
    pub fn get_by_id(&self, id: &str) -> Option<&Shortcut> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Get an entry by trigger
    pub fn find_by_trigger(&self, trigger: &str) -> Option<&Shortcut> {
        self.entries.iter().find(|e| e.trigger == trigger)
    }
}

/// Reject empty triggers and triggers already used by another entry
fn validate_trigger(
    entries: &[Shortcut],
    trigger: &str,
    own_id: Option<&str>,
) -> Result<(), DictionaryError> {
    if trigger.trim().is_empty() {
        return Err(DictionaryError::EmptyTrigger);
    }
    let taken = entries
        .iter()
        .any(|e| e.trigger == trigger && Some(e.id.as_str()) != own_id);
    if taken {
        return Err(DictionaryError::DuplicateTrigger(trigger.to_string()));
    }
    Ok(())
}

impl ShortcutStore for DictionaryStore {
    /// Always reads the file so concurrent edits are visible
    fn get(&self) -> Result<Vec<Shortcut>, DictionaryError> {
        Self::read_entries(&self.config_path)
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;

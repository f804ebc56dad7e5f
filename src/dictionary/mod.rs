// Shortcut dictionary module - stores and serves trigger -> content shortcuts for expansion

mod store;

pub use store::{DictionaryError, DictionaryStore, Shortcut, ShortcutStore};

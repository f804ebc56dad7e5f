// Expansion engine - trigger detection, placeholder resolution and replacement
//
// Control flow: an input event reaches the controller, which re-reads the
// shortcut store and scans the surface. A match with placeholders opens a
// resolution session; otherwise the matching replacer runs immediately.

pub mod controller;
mod normalizer;
pub mod placeholder;
pub mod replacer;
pub mod scanner;

pub use controller::{ExpansionController, InputOutcome, ResolutionSession};
pub use normalizer::normalize;
pub(crate) use normalizer::markup_to_text;
pub use replacer::{locate_range, TextRange, TextTree};
pub use scanner::{MatchLocation, TriggerMatch};

/// Error types for expansion operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpansionError {
    /// The scanned trigger can no longer be located on the surface
    #[error("Trigger '{trigger}' not found on the surface")]
    NotFound { trigger: String },
    /// Confirm/cancel called with no open resolution session
    #[error("No placeholder session is open")]
    NoActiveSession,
    /// The surface passed in is not the one the match was made on
    #[error("Surface does not match the session target")]
    TargetMismatch,
    /// The submitted form does not have the session's placeholder fields
    #[error("Form fields {actual:?} do not match placeholders {expected:?}")]
    FormMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },
}

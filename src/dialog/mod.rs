// Placeholder dialog - the form model behind the placeholder prompt
//
// The form holds one field per unique placeholder. Front ends (the terminal
// prompt in this crate, or any host UI) fill it in and report how it was
// closed via `DialogAction`.

mod form;
mod terminal;

pub use form::{PlaceholderField, PlaceholderForm};
pub use terminal::TerminalDialog;

/// How the dialog was closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    /// Confirm button: insert with the entered values
    Confirm,
    /// Cancel button
    Cancel,
    /// Click on the overlay outside the dialog; same as Cancel
    ClickOutside,
}

impl DialogAction {
    pub fn is_confirm(&self) -> bool {
        matches!(self, DialogAction::Confirm)
    }
}

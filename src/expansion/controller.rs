// Expansion controller - drives input -> scan -> resolve -> replace
//
// Holds at most one resolution session. While a session is open, input
// events are rejected without scanning; the session ends only through
// `confirm` or `cancel`.

use std::collections::HashMap;

use super::placeholder::{self, Resolution};
use super::replacer::{replace_flat, replace_structured};
use super::scanner::{self, MatchLocation};
use super::{markup_to_text, normalize, ExpansionError};
use crate::dialog::{DialogAction, PlaceholderForm};
use crate::dictionary::ShortcutStore;
use crate::events::{
    ExpansionAbortedPayload, ExpansionAppliedPayload, ExpansionEventEmitter,
    SessionClosedPayload, SessionOpenedPayload,
};
use crate::surface::{EditSurface, SurfaceId};

/// Result of handing an event to the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    /// No trigger before the caret (or no shortcuts available)
    NoMatch,
    /// A placeholder session is open; the event was not evaluated
    SessionBusy,
    /// Trigger replaced; structured surfaces still need a flush for the caret
    Expanded { trigger: String },
    /// Trigger found, values needed; show this form and call confirm/cancel
    AwaitingValues { trigger: String, form: PlaceholderForm },
    /// Trigger could not be replaced; surface untouched
    Aborted { trigger: String },
    /// Session cancelled; surface untouched
    Cancelled { trigger: String },
}

/// State while the placeholder dialog is open
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionSession {
    /// Trigger that opened the session
    pub trigger: String,
    /// Content with tags inside braces already stripped
    pub content: String,
    /// Surface the trigger was typed into
    pub target: SurfaceId,
    /// Where the trigger was found
    pub location: MatchLocation,
    /// The form shown to the user
    pub form: PlaceholderForm,
}

/// Coordinates scanning, placeholder sessions and replacement
pub struct ExpansionController<S, E> {
    store: S,
    emitter: E,
    session: Option<ResolutionSession>,
}

impl<S: ShortcutStore, E: ExpansionEventEmitter> ExpansionController<S, E> {
    pub fn new(store: S, emitter: E) -> Self {
        Self {
            store,
            emitter,
            session: None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable store access for the configuration surface
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// The open session, if any
    pub fn session(&self) -> Option<&ResolutionSession> {
        self.session.as_ref()
    }

    /// Handle a text-input event on `surface`.
    ///
    /// Never fails: store errors and vanished triggers are logged and turned
    /// into `NoMatch` / `Aborted`.
    pub fn handle_input(&mut self, surface: &mut EditSurface) -> InputOutcome {
        if let Some(session) = &self.session {
            crate::debug!(
                "Placeholder session for '{}' is open, ignoring input",
                session.trigger
            );
            return InputOutcome::SessionBusy;
        }

        // Re-read every event so edits from the configuration surface apply
        let shortcuts = match self.store.get() {
            Ok(shortcuts) => shortcuts,
            Err(e) => {
                crate::warn!("Shortcut store unavailable, skipping expansion: {}", e);
                return InputOutcome::NoMatch;
            }
        };

        let Some(found) = scanner::scan(surface, &shortcuts) else {
            return InputOutcome::NoMatch;
        };
        crate::debug!("Trigger '{}' matched on {}", found.trigger, surface.id());

        match placeholder::resolve(&found.content) {
            Resolution::Ready(content) => self.apply(
                surface,
                &found.trigger,
                found.location,
                &content,
                &HashMap::new(),
            ),
            Resolution::NeedsValues { content, names } => {
                let form = PlaceholderForm::from_names(&names);
                self.emitter.emit_session_opened(SessionOpenedPayload {
                    surface_id: surface.id().to_string(),
                    trigger: found.trigger.clone(),
                    fields: names,
                });
                crate::info!(
                    "Opened placeholder session for '{}' with {} field(s)",
                    found.trigger,
                    form.len()
                );
                self.session = Some(ResolutionSession {
                    trigger: found.trigger.clone(),
                    content,
                    target: surface.id(),
                    location: found.location,
                    form: form.clone(),
                });
                InputOutcome::AwaitingValues {
                    trigger: found.trigger,
                    form,
                }
            }
        }
    }

    /// Confirm the open session with the filled-in form and run the replacement.
    ///
    /// The session stays open if `surface` is not its target or the form's
    /// fields differ from the session's.
    pub fn confirm(
        &mut self,
        surface: &mut EditSurface,
        form: &PlaceholderForm,
    ) -> Result<InputOutcome, ExpansionError> {
        let session = self.session.as_ref().ok_or(ExpansionError::NoActiveSession)?;
        if session.target != surface.id() {
            return Err(ExpansionError::TargetMismatch);
        }
        if session.form.names() != form.names() {
            return Err(ExpansionError::FormMismatch {
                expected: session.form.names(),
                actual: form.names(),
            });
        }

        let Some(session) = self.session.take() else {
            return Err(ExpansionError::NoActiveSession);
        };
        let values: HashMap<String, String> = form.values();

        self.emitter.emit_session_closed(SessionClosedPayload {
            surface_id: session.target.to_string(),
            trigger: session.trigger.clone(),
            confirmed: true,
        });
        Ok(self.apply(
            surface,
            &session.trigger,
            session.location,
            &session.content,
            &values,
        ))
    }

    /// Discard the open session; the surface is not touched
    pub fn cancel(&mut self) -> Result<InputOutcome, ExpansionError> {
        let session = self.session.take().ok_or(ExpansionError::NoActiveSession)?;
        crate::info!("Placeholder session for '{}' cancelled", session.trigger);
        self.emitter.emit_session_closed(SessionClosedPayload {
            surface_id: session.target.to_string(),
            trigger: session.trigger.clone(),
            confirmed: false,
        });
        Ok(InputOutcome::Cancelled {
            trigger: session.trigger,
        })
    }

    /// Close the dialog the way the user did
    pub fn close_dialog(
        &mut self,
        surface: &mut EditSurface,
        action: DialogAction,
        form: &PlaceholderForm,
    ) -> Result<InputOutcome, ExpansionError> {
        if action.is_confirm() {
            self.confirm(surface, form)
        } else {
            self.cancel()
        }
    }

    /// Fill in `values` and run the replacer matching the surface kind.
    ///
    /// Flat fields get the normalized content with values inserted verbatim;
    /// rich regions get markup with values escaped.
    fn apply(
        &self,
        surface: &mut EditSurface,
        trigger: &str,
        location: MatchLocation,
        content: &str,
        values: &HashMap<String, String>,
    ) -> InputOutcome {
        let surface_id = surface.id().to_string();
        let placeholder_count = values.len();
        let result = match (surface, location) {
            (EditSurface::Flat(flat), MatchLocation::Flat { start }) => {
                // Rich formatting never survives into a plain field
                let plain = placeholder::substitute_text(&normalize(content), values);
                replace_flat(flat, trigger, start, &plain, &self.emitter).map(|_| plain)
            }
            (EditSurface::Structured(rich), MatchLocation::Structured { scope }) => {
                let markup = placeholder::substitute(content, values);
                replace_structured(rich, scope, trigger, &markup, &self.emitter)
                    .map(|_| markup_to_text(&markup))
            }
            _ => Err(ExpansionError::TargetMismatch),
        };

        match result {
            Ok(inserted_text) => {
                crate::info!("Expanded '{}' on {}", trigger, surface_id);
                self.emitter.emit_expansion_applied(ExpansionAppliedPayload {
                    surface_id,
                    trigger: trigger.to_string(),
                    inserted_text,
                    placeholder_count,
                });
                InputOutcome::Expanded {
                    trigger: trigger.to_string(),
                }
            }
            Err(e) => {
                crate::warn!("Expansion of '{}' aborted: {}", trigger, e);
                self.emitter.emit_expansion_aborted(ExpansionAbortedPayload {
                    surface_id,
                    trigger: trigger.to_string(),
                    reason: e.to_string(),
                });
                InputOutcome::Aborted {
                    trigger: trigger.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;

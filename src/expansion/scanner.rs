// Trigger scanner - finds the shortcut whose trigger was just typed
//
// Policy: triggers are tried in store order and the first hit wins. There is
// no word-boundary check, so a trigger fires as soon as it appears, even
// inside a longer word still being typed.

use crate::dictionary::Shortcut;
use crate::surface::{EditSurface, FlatSurface, NodeId, StructuredSurface};

/// Where a trigger was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchLocation {
    /// Char offset of the trigger's first char in a flat value
    Flat { start: usize },
    /// Block element whose text contains the trigger
    Structured { scope: NodeId },
}

/// A trigger found on a surface, with the content it expands to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerMatch {
    pub trigger: String,
    pub content: String,
    pub location: MatchLocation,
}

/// Flat surfaces: the trigger must end exactly at the caret
pub fn scan_flat(surface: &FlatSurface, shortcuts: &[Shortcut]) -> Option<TriggerMatch> {
    let before = surface.text_before_caret();
    shortcuts
        .iter()
        .filter(|s| !s.trigger.is_empty())
        .find(|s| before.ends_with(&s.trigger))
        .map(|s| TriggerMatch {
            trigger: s.trigger.clone(),
            content: s.content.clone(),
            location: MatchLocation::Flat {
                start: surface.caret() - s.trigger.chars().count(),
            },
        })
}

/// Structured surfaces: the trigger may appear anywhere in the text of the
/// block containing the caret
pub fn scan_structured(
    surface: &StructuredSurface,
    shortcuts: &[Shortcut],
) -> Option<TriggerMatch> {
    let scope = surface.caret_scope()?;
    let text = surface.text_content(scope);
    shortcuts
        .iter()
        .filter(|s| !s.trigger.is_empty())
        .find(|s| text.contains(&s.trigger))
        .map(|s| TriggerMatch {
            trigger: s.trigger.clone(),
            content: s.content.clone(),
            location: MatchLocation::Structured { scope },
        })
}

/// Scan whichever kind of surface is active
pub fn scan(surface: &EditSurface, shortcuts: &[Shortcut]) -> Option<TriggerMatch> {
    match surface {
        EditSurface::Flat(s) => scan_flat(s, shortcuts),
        EditSurface::Structured(s) => scan_structured(s, shortcuts),
    }
}

#[cfg(test)]
#[path = "scanner_test.rs"]
mod tests;

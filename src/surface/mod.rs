// Edit surfaces - the two kinds of text-entry targets the engine mutates
//
// Flat surfaces are value-based text boxes. Structured surfaces are rich
// editable regions held as a node tree. Caret offsets are counted in chars.

mod flat;
mod structured;

pub use flat::FlatSurface;
pub use structured::{NodeId, NodeKind, Position, StructuredSurface};

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identity of a surface across events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceId(Uuid);

impl SurfaceId {
    /// Generate a new random id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SurfaceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Variant tag used in events and logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceKind {
    Flat,
    Structured,
}

impl SurfaceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SurfaceKind::Flat => "flat",
            SurfaceKind::Structured => "structured",
        }
    }
}

/// The active text-entry surface
#[derive(Debug, Clone)]
pub enum EditSurface {
    Flat(FlatSurface),
    Structured(StructuredSurface),
}

impl EditSurface {
    pub fn id(&self) -> SurfaceId {
        match self {
            EditSurface::Flat(s) => s.id(),
            EditSurface::Structured(s) => s.id(),
        }
    }

    pub fn kind(&self) -> SurfaceKind {
        match self {
            EditSurface::Flat(_) => SurfaceKind::Flat,
            EditSurface::Structured(_) => SurfaceKind::Structured,
        }
    }

    /// Current text as the user sees it (line breaks as '\n')
    pub fn text(&self) -> String {
        match self {
            EditSurface::Flat(s) => s.value().to_string(),
            EditSurface::Structured(s) => s.plain_text(),
        }
    }

    /// Insert typed text at the caret, as a keystroke would
    pub fn type_text(&mut self, text: &str) {
        match self {
            EditSurface::Flat(s) => s.type_text(text),
            EditSurface::Structured(s) => s.type_text(text),
        }
    }

    /// Run deferred work queued by the last mutation (the "next tick").
    /// Returns true if anything was applied.
    pub fn flush_pending(&mut self) -> bool {
        match self {
            EditSurface::Flat(_) => false,
            EditSurface::Structured(s) => s.flush_pending(),
        }
    }
}

impl From<FlatSurface> for EditSurface {
    fn from(surface: FlatSurface) -> Self {
        EditSurface::Flat(surface)
    }
}

impl From<StructuredSurface> for EditSurface {
    fn from(surface: StructuredSurface) -> Self {
        EditSurface::Structured(surface)
    }
}

/// Byte index of the `char_offset`-th char, clamped to the end
pub(crate) fn byte_index(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

// Flat surface - a single string value with a caret offset

use super::{byte_index, SurfaceId};

/// Value-based text box (input, textarea)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatSurface {
    id: SurfaceId,
    value: String,
    /// Caret offset in chars, always <= char length of value
    caret: usize,
}

impl FlatSurface {
    /// Create a surface with the caret at the end of `value`
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let caret = value.chars().count();
        Self {
            id: SurfaceId::new(),
            value,
            caret,
        }
    }

    /// Builder: set the caret (clamped)
    pub fn with_caret(mut self, caret: usize) -> Self {
        self.set_caret(caret);
        self
    }

    pub fn id(&self) -> SurfaceId {
        self.id
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn set_caret(&mut self, caret: usize) {
        self.caret = caret.min(self.char_len());
    }

    /// Replace the whole value; caret moves to the end
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.caret = self.char_len();
    }

    /// Text from the start of the value up to the caret
    pub fn text_before_caret(&self) -> &str {
        &self.value[..byte_index(&self.value, self.caret)]
    }

    /// Replace `remove` chars starting at char offset `start` with `insert`.
    /// Does not move the caret.
    pub fn splice(&mut self, start: usize, remove: usize, insert: &str) {
        let from = byte_index(&self.value, start);
        let to = byte_index(&self.value, start + remove);
        self.value.replace_range(from..to, insert);
        self.caret = self.caret.min(self.char_len());
    }

    /// Insert text at the caret and advance it
    pub fn type_text(&mut self, text: &str) {
        self.splice(self.caret, 0, text);
        self.caret += text.chars().count();
    }
}

#[cfg(test)]
#[path = "flat_test.rs"]
mod tests;

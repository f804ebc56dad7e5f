// Placeholder form - ordered fields, focus, and value collection

use serde::Serialize;
use std::collections::HashMap;

/// One input in the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceholderField {
    /// Placeholder name as written between braces
    pub name: String,
    /// Label shown next to the input
    pub label: String,
    /// Current (untrimmed) input value
    pub value: String,
}

/// Form with one field per unique placeholder, in first-occurrence order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceholderForm {
    fields: Vec<PlaceholderField>,
    /// Index of the focused field
    focused: usize,
}

impl PlaceholderForm {
    /// Build a form for the given names; the first field gets focus
    pub fn from_names(names: &[String]) -> Self {
        Self {
            fields: names
                .iter()
                .map(|name| PlaceholderField {
                    name: name.clone(),
                    label: name.clone(),
                    value: String::new(),
                })
                .collect(),
            focused: 0,
        }
    }

    pub fn fields(&self) -> &[PlaceholderField] {
        &self.fields
    }

    pub fn names(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// The field holding input focus
    pub fn focused(&self) -> Option<&PlaceholderField> {
        self.fields.get(self.focused)
    }

    pub fn focused_index(&self) -> usize {
        self.focused
    }

    /// Move focus to the next field, wrapping around
    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + 1) % self.fields.len();
        }
    }

    /// Set a field's value by name. Returns false for unknown names.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(field) => {
                field.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Set the focused field's value
    pub fn set_focused_value(&mut self, value: impl Into<String>) {
        if let Some(field) = self.fields.get_mut(self.focused) {
            field.value = value.into();
        }
    }

    /// Trimmed values keyed by placeholder name
    pub fn values(&self) -> HashMap<String, String> {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.value.trim().to_string()))
            .collect()
    }
}

#[cfg(test)]
#[path = "form_test.rs"]
mod tests;

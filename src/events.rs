// Expansion events for host notification
// Defines event payloads and emission trait for testability

use serde::Serialize;

/// Event names as constants for consistency
pub mod event_names {
    pub const SURFACE_INPUT: &str = "surface_input";
    pub const EXPANSION_APPLIED: &str = "expansion_applied";
    pub const EXPANSION_ABORTED: &str = "expansion_aborted";
    pub const SESSION_OPENED: &str = "placeholder_session_opened";
    pub const SESSION_CLOSED: &str = "placeholder_session_closed";
}

/// Payload for surface_input event
///
/// Emitted after the engine mutates a surface, so listeners (autosave,
/// validation) react as if the user had typed the result.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceInputPayload {
    /// Id of the mutated surface
    pub surface_id: String,
    /// "flat" or "structured"
    pub surface_kind: String,
    /// Always true for engine-generated notifications
    pub synthetic: bool,
    /// ISO 8601 timestamp of the mutation
    pub timestamp: String,
}

/// Payload for expansion_applied event
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExpansionAppliedPayload {
    pub surface_id: String,
    /// Trigger that was replaced
    pub trigger: String,
    /// Plain-text form of the inserted content
    pub inserted_text: String,
    /// Number of distinct placeholders that were filled
    pub placeholder_count: usize,
}

/// Payload for expansion_aborted event
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExpansionAbortedPayload {
    pub surface_id: String,
    pub trigger: String,
    /// Human-readable reason
    pub reason: String,
}

/// Payload for placeholder_session_opened event
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionOpenedPayload {
    pub surface_id: String,
    pub trigger: String,
    /// Placeholder names in form order
    pub fields: Vec<String>,
}

/// Payload for placeholder_session_closed event
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionClosedPayload {
    pub surface_id: String,
    pub trigger: String,
    /// True when closed by confirm, false on cancel
    pub confirmed: bool,
}

/// Trait for emitting expansion events
/// Allows mocking in tests while logging (or forwarding to a UI) in production
pub trait ExpansionEventEmitter: Send + Sync {
    /// Emit the synthetic input notification after a surface mutation
    fn emit_surface_input(&self, payload: SurfaceInputPayload);

    /// Emit expansion_applied event
    fn emit_expansion_applied(&self, payload: ExpansionAppliedPayload);

    /// Emit expansion_aborted event
    fn emit_expansion_aborted(&self, payload: ExpansionAbortedPayload);

    /// Emit placeholder_session_opened event
    fn emit_session_opened(&self, payload: SessionOpenedPayload);

    /// Emit placeholder_session_closed event
    fn emit_session_closed(&self, payload: SessionClosedPayload);
}

/// Emitter that writes every event to the log as JSON
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEventEmitter;

impl LogEventEmitter {
    fn log_event<T: Serialize>(name: &str, payload: &T) {
        match serde_json::to_string(payload) {
            Ok(json) => crate::debug!("[event] {} {}", name, json),
            Err(e) => crate::warn!("Failed to serialize event '{}': {}", name, e),
        }
    }
}

impl ExpansionEventEmitter for LogEventEmitter {
    fn emit_surface_input(&self, payload: SurfaceInputPayload) {
        Self::log_event(event_names::SURFACE_INPUT, &payload);
    }

    fn emit_expansion_applied(&self, payload: ExpansionAppliedPayload) {
        Self::log_event(event_names::EXPANSION_APPLIED, &payload);
    }

    fn emit_expansion_aborted(&self, payload: ExpansionAbortedPayload) {
        Self::log_event(event_names::EXPANSION_ABORTED, &payload);
    }

    fn emit_session_opened(&self, payload: SessionOpenedPayload) {
        Self::log_event(event_names::SESSION_OPENED, &payload);
    }

    fn emit_session_closed(&self, payload: SessionClosedPayload) {
        Self::log_event(event_names::SESSION_CLOSED, &payload);
    }
}

/// Get the current timestamp in ISO 8601 format
pub fn current_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

#[cfg(test)]
#[path = "events_test.rs"]
pub(crate) mod tests;

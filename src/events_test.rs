use super::*;
use std::sync::{Arc, Mutex};

/// Mock emitter that records all emitted events for testing
#[derive(Default, Clone)]
pub struct MockEventEmitter {
    pub input_events: Arc<Mutex<Vec<SurfaceInputPayload>>>,
    pub applied_events: Arc<Mutex<Vec<ExpansionAppliedPayload>>>,
    pub aborted_events: Arc<Mutex<Vec<ExpansionAbortedPayload>>>,
    pub opened_events: Arc<Mutex<Vec<SessionOpenedPayload>>>,
    pub closed_events: Arc<Mutex<Vec<SessionClosedPayload>>>,
}

impl MockEventEmitter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ExpansionEventEmitter for MockEventEmitter {
    fn emit_surface_input(&self, payload: SurfaceInputPayload) {
        self.input_events.lock().unwrap().push(payload);
    }

    fn emit_expansion_applied(&self, payload: ExpansionAppliedPayload) {
        self.applied_events.lock().unwrap().push(payload);
    }

    fn emit_expansion_aborted(&self, payload: ExpansionAbortedPayload) {
        self.aborted_events.lock().unwrap().push(payload);
    }

    fn emit_session_opened(&self, payload: SessionOpenedPayload) {
        self.opened_events.lock().unwrap().push(payload);
    }

    fn emit_session_closed(&self, payload: SessionClosedPayload) {
        self.closed_events.lock().unwrap().push(payload);
    }
}

#[test]
fn test_current_timestamp_is_iso8601() {
    let timestamp = current_timestamp();
    assert!(timestamp.contains("T"));
    assert!(chrono::DateTime::parse_from_rfc3339(&timestamp).is_ok());
}

// Verify serde camelCase rename works (smoke test for payloads)
#[test]
fn test_serde_camel_case_rename() {
    let payload = ExpansionAppliedPayload {
        surface_id: "s-1".to_string(),
        trigger: "brb".to_string(),
        inserted_text: "Be right back".to_string(),
        placeholder_count: 0,
    };
    let json = serde_json::to_string(&payload).unwrap();
    assert!(json.contains("surfaceId"));
    assert!(json.contains("insertedText"));
    assert!(json.contains("placeholderCount"));
    assert!(!json.contains("surface_id"));
}

#[test]
fn test_mock_emitter_records_events() {
    let emitter = MockEventEmitter::new();

    emitter.emit_surface_input(SurfaceInputPayload {
        surface_id: "s-1".to_string(),
        surface_kind: "flat".to_string(),
        synthetic: true,
        timestamp: "2025-01-01T12:00:00Z".to_string(),
    });
    emitter.emit_session_opened(SessionOpenedPayload {
        surface_id: "s-1".to_string(),
        trigger: "addr".to_string(),
        fields: vec!["location".to_string()],
    });
    emitter.emit_session_closed(SessionClosedPayload {
        surface_id: "s-1".to_string(),
        trigger: "addr".to_string(),
        confirmed: false,
    });

    assert_eq!(emitter.input_events.lock().unwrap().len(), 1);
    assert_eq!(emitter.opened_events.lock().unwrap().len(), 1);
    assert!(!emitter.closed_events.lock().unwrap()[0].confirmed);
    assert!(emitter.applied_events.lock().unwrap().is_empty());
}

#[test]
fn test_log_emitter_does_not_panic() {
    let emitter = LogEventEmitter;
    emitter.emit_expansion_aborted(ExpansionAbortedPayload {
        surface_id: "s-1".to_string(),
        trigger: "brb".to_string(),
        reason: "trigger text no longer present".to_string(),
    });
}

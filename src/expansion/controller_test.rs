// Tests for ExpansionController
// Test cases:
// - "brb" in "ok brb" expands to "ok Be right back", caret 16
// - Content without placeholders expands immediately, no session
// - "addr" opens a session with one "location" field; confirm inserts the value
// - Repeated placeholder gets the same value at every site
// - Cancel / click outside leaves the surface exactly as typed
// - Input while a session is open is rejected without scanning
// - Rich surface: split trigger replaced, caret after content after flush
// - Store failure fails open; store is re-read every event
// - Confirm against the wrong surface or form keeps the session
// - Flat fields keep `<`/`>`/`&` in content and values verbatim

use super::*;
use crate::dictionary::{DictionaryError, Shortcut};
use crate::events::tests::MockEventEmitter;
use crate::surface::{FlatSurface, StructuredSurface};
use std::cell::RefCell;

fn shortcut(trigger: &str, content: &str) -> Shortcut {
    Shortcut {
        id: format!("test-{}", trigger),
        trigger: trigger.to_string(),
        content: content.to_string(),
    }
}

fn controller(
    shortcuts: Vec<Shortcut>,
) -> (ExpansionController<Vec<Shortcut>, MockEventEmitter>, MockEventEmitter) {
    let emitter = MockEventEmitter::new();
    (ExpansionController::new(shortcuts, emitter.clone()), emitter)
}

fn flat_value(surface: &EditSurface) -> (&str, usize) {
    match surface {
        EditSurface::Flat(s) => (s.value(), s.caret()),
        _ => panic!("expected flat surface"),
    }
}

/// Store that fails until told otherwise
struct FlakyStore {
    fail: RefCell<bool>,
    reads: RefCell<usize>,
}

impl ShortcutStore for FlakyStore {
    fn get(&self) -> Result<Vec<Shortcut>, DictionaryError> {
        *self.reads.borrow_mut() += 1;
        if *self.fail.borrow() {
            Err(DictionaryError::LoadError("disk gone".to_string()))
        } else {
            Ok(vec![shortcut("brb", "Be right back")])
        }
    }
}

#[test]
fn test_flat_expansion_scenario() {
    let (mut controller, emitter) = controller(vec![shortcut("brb", "Be right back")]);
    let mut surface = EditSurface::from(FlatSurface::new("ok brb"));

    let outcome = controller.handle_input(&mut surface);

    assert_eq!(
        outcome,
        InputOutcome::Expanded {
            trigger: "brb".to_string()
        }
    );
    assert_eq!(flat_value(&surface), ("ok Be right back", 16));
    assert_eq!(emitter.input_events.lock().unwrap().len(), 1);
    assert_eq!(
        emitter.applied_events.lock().unwrap()[0].inserted_text,
        "Be right back"
    );
}

#[test]
fn test_flat_expansion_uses_normalized_content() {
    let (mut controller, _emitter) =
        controller(vec![shortcut("sig", "<p>Thanks</p><b>Field</b> Team")]);
    let mut surface = EditSurface::from(FlatSurface::new("Bye sig"));

    controller.handle_input(&mut surface);

    let expected = "Bye Thanks\n\nField Team";
    assert_eq!(flat_value(&surface), (expected, expected.chars().count()));
}

#[test]
fn test_flat_expansion_keeps_plain_comparisons() {
    let (mut controller, emitter) = controller(vec![shortcut("cmp", "if a<b and c>d then")]);
    let mut surface = EditSurface::from(FlatSurface::new("cmp"));

    controller.handle_input(&mut surface);

    let expected = "if a<b and c>d then";
    assert_eq!(flat_value(&surface), (expected, expected.len()));
    assert_eq!(emitter.applied_events.lock().unwrap()[0].inserted_text, expected);
}

#[test]
fn test_flat_placeholder_values_inserted_verbatim() {
    let (mut controller, _emitter) =
        controller(vec![shortcut("co", "<b>{company}</b> confirmed")]);
    let mut surface = EditSurface::from(FlatSurface::new("co"));

    let InputOutcome::AwaitingValues { mut form, .. } = controller.handle_input(&mut surface)
    else {
        panic!("expected AwaitingValues");
    };
    form.set_value("company", "Smith & <b>Sons</b>");
    controller.confirm(&mut surface, &form).unwrap();

    assert_eq!(flat_value(&surface).0, "Smith & <b>Sons</b> confirmed");
}

#[test]
fn test_no_placeholders_means_no_session() {
    let (mut controller, emitter) = controller(vec![shortcut("ty", "Thank you {}")]);
    let mut surface = EditSurface::from(FlatSurface::new("ty"));

    let outcome = controller.handle_input(&mut surface);

    assert!(matches!(outcome, InputOutcome::Expanded { .. }));
    assert!(controller.session().is_none());
    assert!(emitter.opened_events.lock().unwrap().is_empty());
    assert_eq!(flat_value(&surface).0, "Thank you {}");
}

#[test]
fn test_no_match_leaves_surface_alone() {
    let (mut controller, emitter) = controller(vec![shortcut("brb", "Be right back")]);
    let mut surface = EditSurface::from(FlatSurface::new("hello"));

    assert_eq!(controller.handle_input(&mut surface), InputOutcome::NoMatch);
    assert_eq!(flat_value(&surface), ("hello", 5));
    assert!(emitter.input_events.lock().unwrap().is_empty());
}

#[test]
fn test_placeholder_dialog_scenario() {
    let (mut controller, emitter) =
        controller(vec![shortcut("addr", "Visit us at {location} today")]);
    let mut surface = EditSurface::from(FlatSurface::new("addr"));

    let outcome = controller.handle_input(&mut surface);
    let InputOutcome::AwaitingValues { trigger, mut form } = outcome else {
        panic!("expected AwaitingValues, got {:?}", outcome);
    };
    assert_eq!(trigger, "addr");
    assert_eq!(form.len(), 1);
    assert_eq!(form.focused().unwrap().label, "location");
    // Nothing changes while the dialog is open
    assert_eq!(flat_value(&surface).0, "addr");

    form.set_focused_value("Perth Service Center ");
    let outcome = controller.confirm(&mut surface, &form).unwrap();

    assert!(matches!(outcome, InputOutcome::Expanded { .. }));
    let expected = "Visit us at Perth Service Center today";
    assert_eq!(flat_value(&surface), (expected, expected.len()));
    assert!(controller.session().is_none());
    assert_eq!(emitter.opened_events.lock().unwrap()[0].fields, vec!["location"]);
    assert!(emitter.closed_events.lock().unwrap()[0].confirmed);
    assert_eq!(
        emitter.applied_events.lock().unwrap()[0].placeholder_count,
        1
    );
}

#[test]
fn test_repeated_placeholder_same_value_everywhere() {
    let (mut controller, _emitter) =
        controller(vec![shortcut("crew", "Crew from {city} heading to {city} depot")]);
    let mut surface = EditSurface::from(FlatSurface::new("crew"));

    let InputOutcome::AwaitingValues { mut form, .. } = controller.handle_input(&mut surface)
    else {
        panic!("expected AwaitingValues");
    };
    assert_eq!(form.len(), 1);
    form.set_value("city", "Perth");
    controller.confirm(&mut surface, &form).unwrap();

    assert_eq!(flat_value(&surface).0, "Crew from Perth heading to Perth depot");
}

#[test]
fn test_cancel_leaves_trigger_text_in_place() {
    let (mut controller, emitter) =
        controller(vec![shortcut("addr", "Visit us at {location} today")]);
    let mut surface = EditSurface::from(FlatSurface::new("see addr"));

    let InputOutcome::AwaitingValues { form, .. } = controller.handle_input(&mut surface) else {
        panic!("expected AwaitingValues");
    };
    let outcome = controller
        .close_dialog(&mut surface, DialogAction::Cancel, &form)
        .unwrap();

    assert_eq!(
        outcome,
        InputOutcome::Cancelled {
            trigger: "addr".to_string()
        }
    );
    assert_eq!(flat_value(&surface), ("see addr", 8));
    assert!(controller.session().is_none());
    assert!(!emitter.closed_events.lock().unwrap()[0].confirmed);
    assert!(emitter.input_events.lock().unwrap().is_empty());
}

#[test]
fn test_click_outside_is_cancel() {
    let (mut controller, _emitter) = controller(vec![shortcut("addr", "At {location}")]);
    let mut surface = EditSurface::from(FlatSurface::new("addr"));

    let InputOutcome::AwaitingValues { mut form, .. } = controller.handle_input(&mut surface)
    else {
        panic!("expected AwaitingValues");
    };
    form.set_value("location", "Perth");
    let outcome = controller
        .close_dialog(&mut surface, DialogAction::ClickOutside, &form)
        .unwrap();

    assert!(matches!(outcome, InputOutcome::Cancelled { .. }));
    assert_eq!(flat_value(&surface).0, "addr");
}

#[test]
fn test_input_rejected_while_session_open() {
    let (mut controller, _emitter) = controller(vec![
        shortcut("addr", "At {location}"),
        shortcut("brb", "Be right back"),
    ]);
    let mut first = EditSurface::from(FlatSurface::new("addr"));
    let mut second = EditSurface::from(FlatSurface::new("brb"));

    assert!(matches!(
        controller.handle_input(&mut first),
        InputOutcome::AwaitingValues { .. }
    ));
    assert_eq!(controller.handle_input(&mut second), InputOutcome::SessionBusy);
    assert_eq!(flat_value(&second).0, "brb");

    controller.cancel().unwrap();
    assert!(matches!(
        controller.handle_input(&mut second),
        InputOutcome::Expanded { .. }
    ));
}

#[test]
fn test_confirm_and_cancel_without_session() {
    let (mut controller, _emitter) = controller(vec![]);
    let mut surface = EditSurface::from(FlatSurface::new(""));
    let form = PlaceholderForm::from_names(&[]);

    assert_eq!(
        controller.confirm(&mut surface, &form),
        Err(ExpansionError::NoActiveSession)
    );
    assert_eq!(controller.cancel(), Err(ExpansionError::NoActiveSession));
}

#[test]
fn test_confirm_on_other_surface_keeps_session() {
    let (mut controller, _emitter) = controller(vec![shortcut("addr", "At {location}")]);
    let mut target = EditSurface::from(FlatSurface::new("addr"));
    let mut other = EditSurface::from(FlatSurface::new("addr"));

    let InputOutcome::AwaitingValues { form, .. } = controller.handle_input(&mut target) else {
        panic!("expected AwaitingValues");
    };

    assert_eq!(
        controller.confirm(&mut other, &form),
        Err(ExpansionError::TargetMismatch)
    );
    assert!(controller.session().is_some());
    assert_eq!(flat_value(&other).0, "addr");

    let wrong_form = PlaceholderForm::from_names(&["city".to_string()]);
    assert!(matches!(
        controller.confirm(&mut target, &wrong_form),
        Err(ExpansionError::FormMismatch { .. })
    ));
    assert!(controller.session().is_some());
}

#[test]
fn test_trigger_edited_away_before_confirm_aborts() {
    let (mut controller, emitter) = controller(vec![shortcut("addr", "At {location}")]);
    let mut surface = EditSurface::from(FlatSurface::new("addr"));

    let InputOutcome::AwaitingValues { form, .. } = controller.handle_input(&mut surface) else {
        panic!("expected AwaitingValues");
    };
    if let EditSurface::Flat(flat) = &mut surface {
        flat.set_value("cleared");
    }

    let outcome = controller.confirm(&mut surface, &form).unwrap();

    assert!(matches!(outcome, InputOutcome::Aborted { .. }));
    assert_eq!(flat_value(&surface).0, "cleared");
    assert_eq!(emitter.aborted_events.lock().unwrap().len(), 1);
    assert!(controller.session().is_none());
}

#[test]
fn test_structured_split_trigger_scenario() {
    let (mut controller, emitter) = controller(vec![shortcut("abc", "<b>Alpha</b> Beta")]);
    let mut surface = EditSurface::from(StructuredSurface::from_html("<p>ab<span>c</span></p>"));

    let outcome = controller.handle_input(&mut surface);
    assert!(matches!(outcome, InputOutcome::Expanded { .. }));
    assert!(surface.flush_pending());

    let EditSurface::Structured(rich) = &surface else {
        panic!("expected structured surface");
    };
    assert_eq!(rich.to_html(), "<p><b>Alpha</b> Beta<span></span></p>");
    let caret = rich.caret().unwrap();
    assert_eq!(rich.text_before(caret), "Alpha Beta");
    assert_eq!(emitter.input_events.lock().unwrap()[0].surface_kind, "structured");
}

#[test]
fn test_structured_placeholder_value_is_inserted_as_text() {
    let (mut controller, _emitter) =
        controller(vec![shortcut("co", "<i>{company}</i> confirmed")]);
    let mut surface = EditSurface::from(StructuredSurface::from_html("<p>Job: co</p>"));

    let InputOutcome::AwaitingValues { mut form, .. } = controller.handle_input(&mut surface)
    else {
        panic!("expected AwaitingValues");
    };
    form.set_value("company", "Smith & <Sons>");
    controller.confirm(&mut surface, &form).unwrap();
    surface.flush_pending();

    let EditSurface::Structured(rich) = &surface else {
        panic!("expected structured surface");
    };
    assert_eq!(
        rich.to_html(),
        "<p>Job: <i>Smith &amp; &lt;Sons&gt;</i> confirmed</p>"
    );
    assert_eq!(rich.plain_text(), "Job: Smith & <Sons> confirmed\n\n");
}

#[test]
fn test_store_failure_fails_open_and_store_is_reread() {
    let store = FlakyStore {
        fail: RefCell::new(true),
        reads: RefCell::new(0),
    };
    let mut controller = ExpansionController::new(store, MockEventEmitter::new());
    let mut surface = EditSurface::from(FlatSurface::new("brb"));

    assert_eq!(controller.handle_input(&mut surface), InputOutcome::NoMatch);
    assert_eq!(flat_value(&surface).0, "brb");

    *controller.store().fail.borrow_mut() = false;
    assert!(matches!(
        controller.handle_input(&mut surface),
        InputOutcome::Expanded { .. }
    ));
    assert_eq!(*controller.store().reads.borrow(), 2);
}

// Tests for the terminal dialog

use super::*;
use std::io::Cursor;

fn form(names: &[&str]) -> PlaceholderForm {
    let names: Vec<String> = names.iter().map(|s| s.to_string()).collect();
    PlaceholderForm::from_names(&names)
}

#[test]
fn test_fills_every_field_and_confirms() {
    let mut output = Vec::new();
    let mut form = form(&["location", "time"]);
    let mut dialog = TerminalDialog::new(Cursor::new("Perth Service Center\n9am\n"), &mut output);

    let action = dialog.run("addr", &mut form).unwrap();

    assert_eq!(action, DialogAction::Confirm);
    assert_eq!(form.values()["location"], "Perth Service Center");
    assert_eq!(form.values()["time"], "9am");
    let printed = String::from_utf8(output).unwrap();
    assert!(printed.contains("location: "));
    assert!(printed.contains("time: "));
}

#[test]
fn test_cancel_command_cancels() {
    let mut output = Vec::new();
    let mut form = form(&["location", "time"]);
    let mut dialog = TerminalDialog::new(Cursor::new("Perth\n:cancel\n"), &mut output);

    assert_eq!(dialog.run("addr", &mut form).unwrap(), DialogAction::Cancel);
}

#[test]
fn test_end_of_input_cancels() {
    let mut output = Vec::new();
    let mut form = form(&["location"]);
    let mut dialog = TerminalDialog::new(Cursor::new(""), &mut output);

    assert_eq!(dialog.run("addr", &mut form).unwrap(), DialogAction::Cancel);
}

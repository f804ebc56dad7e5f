// Terminal front end for the placeholder form
//
// Prompts for each field in order. Typing `:cancel` at any prompt, or
// closing input, cancels the whole dialog.

use std::io::{self, BufRead, Write};

use super::{DialogAction, PlaceholderForm};

/// Input that cancels the dialog
const CANCEL_COMMAND: &str = ":cancel";

/// Line-based placeholder prompt
pub struct TerminalDialog<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalDialog<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Fill `form` from input, one line per field starting at the focused one
    pub fn run(&mut self, trigger: &str, form: &mut PlaceholderForm) -> io::Result<DialogAction> {
        writeln!(
            self.output,
            "'{}' needs {} value(s) ({} to cancel)",
            trigger,
            form.len(),
            CANCEL_COMMAND
        )?;

        for _ in 0..form.len() {
            let label = match form.focused() {
                Some(field) => field.label.clone(),
                None => break,
            };
            write!(self.output, "  {}: ", label)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(DialogAction::Cancel);
            }
            let line = line.trim_end_matches(['\r', '\n']);
            if line.trim() == CANCEL_COMMAND {
                return Ok(DialogAction::Cancel);
            }
            form.set_focused_value(line);
            form.focus_next();
        }

        Ok(DialogAction::Confirm)
    }
}

#[cfg(test)]
#[path = "terminal_test.rs"]
mod tests;

//! Line-based expansion session.
//!
//! Each non-command line is typed into the active surface and followed by
//! one input event, the way a browser fires `input` after a keystroke.

use std::io::{self, BufRead, Write};

use crate::dialog::TerminalDialog;
use crate::dictionary::DictionaryStore;
use crate::events::LogEventEmitter;
use crate::expansion::{ExpansionController, InputOutcome};
use crate::surface::{EditSurface, FlatSurface, StructuredSurface};

/// Which kind of surface typed text goes into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplMode {
    Plain,
    Rich,
}

impl ReplMode {
    fn empty_surface(self) -> EditSurface {
        match self {
            ReplMode::Plain => FlatSurface::new("").into(),
            ReplMode::Rich => StructuredSurface::new().into(),
        }
    }
}

const HELP: &str = "\
commands:
  :add <trigger> <content>   define a shortcut ({name} for placeholders)
  :del <trigger>             remove a shortcut
  :list                      list shortcuts
  :mode plain|rich           switch surface kind (clears it)
  :clear                     clear the surface
  :help                      this text
  :quit                      exit
anything else is typed into the surface";

/// Interactive session over any reader/writer pair
pub struct Repl<R, W> {
    input: R,
    output: W,
    controller: ExpansionController<DictionaryStore, LogEventEmitter>,
    mode: ReplMode,
    surface: EditSurface,
}

impl<R: BufRead, W: Write> Repl<R, W> {
    pub fn new(store: DictionaryStore, input: R, output: W) -> Self {
        let mode = ReplMode::Plain;
        Self {
            input,
            output,
            controller: ExpansionController::new(store, LogEventEmitter),
            mode,
            surface: mode.empty_surface(),
        }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn surface(&self) -> &EditSurface {
        &self.surface
    }

    /// Read lines until `:quit` or end of input
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "quickfill ready, :help for commands")?;
        loop {
            write!(self.output, "{} ", self.prompt())?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(());
            }
            let line = line.trim_end_matches(['\r', '\n']);
            if !self.handle_line(line)? {
                return Ok(());
            }
        }
    }

    fn prompt(&self) -> &'static str {
        match self.mode {
            ReplMode::Plain => "plain>",
            ReplMode::Rich => "rich>",
        }
    }

    /// Returns false when the session should end
    fn handle_line(&mut self, line: &str) -> io::Result<bool> {
        let Some(command) = line.strip_prefix(':') else {
            self.type_line(line)?;
            return Ok(true);
        };

        let (name, rest) = command
            .split_once(char::is_whitespace)
            .map(|(n, r)| (n, r.trim()))
            .unwrap_or((command, ""));
        match name {
            "quit" | "q" => return Ok(false),
            "help" => writeln!(self.output, "{}", HELP)?,
            "list" => self.list_shortcuts()?,
            "add" => self.add_shortcut(rest)?,
            "del" => self.delete_shortcut(rest)?,
            "mode" => match rest {
                "plain" => self.switch_mode(ReplMode::Plain)?,
                "rich" => self.switch_mode(ReplMode::Rich)?,
                _ => writeln!(self.output, "usage: :mode plain|rich")?,
            },
            "clear" => {
                self.surface = self.mode.empty_surface();
                writeln!(self.output, "surface cleared")?;
            }
            _ => writeln!(self.output, "unknown command ':{}', try :help", name)?,
        }
        Ok(true)
    }

    fn switch_mode(&mut self, mode: ReplMode) -> io::Result<()> {
        self.mode = mode;
        self.surface = mode.empty_surface();
        writeln!(self.output, "switched to {} surface", self.surface.kind().as_str())
    }

    /// Pick up edits made to the shortcut file since the last read
    fn reload_store(&mut self) -> io::Result<()> {
        match self.controller.store_mut().load() {
            Ok(()) => Ok(()),
            Err(e) => writeln!(self.output, "error: {}", e),
        }
    }

    fn list_shortcuts(&mut self) -> io::Result<()> {
        self.reload_store()?;
        let entries = self.controller.store().list();
        if entries.is_empty() {
            return writeln!(self.output, "no shortcuts defined");
        }
        for entry in entries {
            writeln!(self.output, "  {:<12} {}", entry.trigger, entry.content)?;
        }
        Ok(())
    }

    fn add_shortcut(&mut self, args: &str) -> io::Result<()> {
        let Some((trigger, content)) = args.split_once(char::is_whitespace) else {
            return writeln!(self.output, "usage: :add <trigger> <content>");
        };
        match self
            .controller
            .store_mut()
            .add(trigger.to_string(), content.trim_start().to_string())
        {
            Ok(entry) => writeln!(self.output, "added '{}'", entry.trigger),
            Err(e) => writeln!(self.output, "error: {}", e),
        }
    }

    fn delete_shortcut(&mut self, trigger: &str) -> io::Result<()> {
        self.reload_store()?;
        let id = self
            .controller
            .store()
            .find_by_trigger(trigger)
            .map(|entry| entry.id.clone());
        let Some(id) = id else {
            return writeln!(self.output, "no shortcut '{}'", trigger);
        };
        match self.controller.store_mut().delete(&id) {
            Ok(()) => writeln!(self.output, "deleted '{}'", trigger),
            Err(e) => writeln!(self.output, "error: {}", e),
        }
    }

    /// Type a line into the surface and dispatch one input event
    fn type_line(&mut self, line: &str) -> io::Result<()> {
        self.surface.type_text(line);

        let outcome = match self.controller.handle_input(&mut self.surface) {
            InputOutcome::AwaitingValues { trigger, mut form } => {
                let action = TerminalDialog::new(&mut self.input, &mut self.output)
                    .run(&trigger, &mut form)?;
                match self
                    .controller
                    .close_dialog(&mut self.surface, action, &form)
                {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        crate::error!("Failed to close placeholder dialog: {}", e);
                        InputOutcome::Aborted { trigger }
                    }
                }
            }
            outcome => outcome,
        };
        // Next tick: deferred caret moves land now
        self.surface.flush_pending();

        match &outcome {
            InputOutcome::Expanded { trigger } => writeln!(self.output, "expanded '{}'", trigger)?,
            InputOutcome::Cancelled { trigger } => writeln!(self.output, "cancelled '{}'", trigger)?,
            InputOutcome::Aborted { trigger } => {
                writeln!(self.output, "could not expand '{}'", trigger)?
            }
            _ => {}
        }
        self.print_surface()
    }

    fn print_surface(&mut self) -> io::Result<()> {
        match &self.surface {
            EditSurface::Flat(flat) => {
                writeln!(self.output, "| {}", flat.value())?;
                writeln!(self.output, "  caret at {}", flat.caret())
            }
            EditSurface::Structured(rich) => {
                writeln!(self.output, "| {}", rich.to_html())?;
                for line in rich.plain_text().lines() {
                    writeln!(self.output, ". {}", line)?;
                }
                match rich.caret() {
                    Some(caret) => writeln!(
                        self.output,
                        "  caret at {}",
                        rich.text_before(caret).chars().count()
                    ),
                    None => Ok(()),
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "repl_test.rs"]
mod tests;

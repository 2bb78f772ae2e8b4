//! Executes parsed script commands against a jump list and an in-memory host.

use std::io::Write;

use log::debug;
use thiserror::Error;

use super::script::{parse_line, ParseError, ScriptCommand};
use crate::commands::{execute, handle_event, Command, CommandOutput, DocumentEvent};
use crate::history::{JumpList, JumpOutcome, JumpPicker, MessageLevel, Position};
use crate::host::{HostError, MemoryHost};

/// Errors produced while running a script line.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Host(#[from] HostError),

    #[error("no document is active")]
    NoActiveDocument,

    #[error("the picker has no row {0}")]
    NoSuchRow(usize),

    #[error("interactive picking needs a terminal")]
    NotInteractive,

    #[error("picker failed: {0}")]
    Picker(String),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Drives a [`JumpList`] and a [`MemoryHost`] from script lines.
///
/// Every outcome message is written to the output as one line, prefixed
/// with `warning:` when it is not informational.
#[derive(Debug)]
pub struct ScriptRunner {
    jumps: JumpList,
    host: MemoryHost,
    interactive: bool,
}

impl ScriptRunner {
    pub fn new(jumps: JumpList, host: MemoryHost) -> Self {
        Self {
            jumps,
            host,
            interactive: false,
        }
    }

    /// Allows `pick` without a row to open the terminal picker.
    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn jumps(&self) -> &JumpList {
        &self.jumps
    }

    pub fn host(&self) -> &MemoryHost {
        &self.host
    }

    /// Parses and runs one line.
    pub fn run_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<(), ScriptError> {
        match parse_line(line)? {
            Some(command) => self.run(command, out),
            None => Ok(()),
        }
    }

    /// Runs one command.
    pub fn run<W: Write>(&mut self, command: ScriptCommand, out: &mut W) -> Result<(), ScriptError> {
        debug!("Script: {:?}", command);

        match command {
            ScriptCommand::Open(path) => {
                self.host.open_file(&path)?;
                writeln!(out, "Opened {}", path.display())?;
            }
            ScriptCommand::New { id, text } => {
                self.host.open(id.clone(), &text)?;
                writeln!(out, "Created {}", id)?;
            }
            ScriptCommand::Cursor { line, column } => {
                self.host.set_cursor(Position::new(line.saturating_sub(1), column.saturating_sub(1)))?;
            }
            ScriptCommand::Run(command) => match execute(command, &mut self.jumps, &mut self.host) {
                CommandOutput::Outcome(outcome) => write_outcome(out, &outcome)?,
                CommandOutput::Picker(picker) => write_picker(out, &picker)?,
            },
            ScriptCommand::Pick(row) => self.pick(row, out)?,
            ScriptCommand::Edit { first, last, text } => {
                let file = self
                    .host
                    .active_file()
                    .ok_or(ScriptError::NoActiveDocument)?
                    .to_string();
                let edit = self.host.replace_lines(
                    &file,
                    first.saturating_sub(1),
                    last.saturating_sub(1),
                    &text,
                )?;
                let event = DocumentEvent::Changed {
                    file: file.clone(),
                    edits: vec![edit],
                };
                let moved = handle_event(&event, &mut self.jumps, &self.host);
                writeln!(out, "Edited {} ({} jump point(s) moved)", file, moved)?;
            }
            ScriptCommand::Rename { old, new } => {
                let pairs = self.host.rename(&old, &new)?;
                let renamed = handle_event(&DocumentEvent::Renamed { pairs }, &mut self.jumps, &self.host);
                writeln!(out, "Renamed {} to {} ({} jump point(s) updated)", old, new, renamed)?;
            }
            ScriptCommand::Delete(target) => {
                let files = self.host.delete(&target)?;
                let removed = handle_event(&DocumentEvent::Deleted { files }, &mut self.jumps, &self.host);
                writeln!(out, "Deleted {} ({} jump point(s) removed)", target, removed)?;
            }
            ScriptCommand::Stack(enabled) => {
                self.jumps.set_stack_mode(enabled);
                writeln!(out, "Stack mode {}", if enabled { "on" } else { "off" })?;
            }
        }
        Ok(())
    }

    fn pick<W: Write>(&mut self, row: Option<usize>, out: &mut W) -> Result<(), ScriptError> {
        let mut picker = match execute(Command::Jump, &mut self.jumps, &mut self.host) {
            CommandOutput::Picker(picker) => picker,
            CommandOutput::Outcome(outcome) => return write_outcome(out, &outcome),
        };

        match row {
            Some(row) => {
                if !picker.select(row) {
                    return Err(ScriptError::NoSuchRow(row));
                }
                self.jumps.peek(&picker, &mut self.host);
            }
            None => {
                if !self.interactive {
                    return Err(ScriptError::NotInteractive);
                }
                let jumps = &self.jumps;
                let host = &mut self.host;
                let accepted = crate::ui::run_interactive_picker(&mut picker, |picker| {
                    jumps.peek(picker, host);
                })
                .map_err(|e| ScriptError::Picker(format!("{:#}", e)))?;
                if !accepted {
                    writeln!(out, "Picker dismissed")?;
                    return Ok(());
                }
            }
        }

        let outcome = self.jumps.accept(&picker, &mut self.host);
        write_outcome(out, &outcome)
    }
}

fn write_outcome<W: Write>(out: &mut W, outcome: &JumpOutcome) -> Result<(), ScriptError> {
    let message = outcome.message();
    match message.level {
        MessageLevel::Info => writeln!(out, "{}", message.text)?,
        MessageLevel::Warning => writeln!(out, "warning: {}", message.text)?,
    }
    Ok(())
}

/// Prints one row per picker entry, marking the highlighted row with `>`.
fn write_picker<W: Write>(out: &mut W, picker: &JumpPicker) -> Result<(), ScriptError> {
    for (row, entry) in picker.entries().iter().enumerate() {
        let marker = if row == picker.selected_index() { ">" } else { " " };
        if entry.is_live() {
            writeln!(out, "{} {:>2}", marker, row)?;
        } else {
            writeln!(out, "{} {:>2} {}  {}", marker, row, entry.label, entry.detail)?;
        }
    }
    Ok(())
}

//! Host-facing commands and document events.
//!
//! A host binds the commands below to keys or menu entries and forwards its
//! document notifications as [`DocumentEvent`]s. Both are dispatched against
//! a [`JumpList`] the host owns.

use std::fmt;
use std::str::FromStr;

use log::debug;
use thiserror::Error;

use crate::history::{JumpList, JumpOutcome, JumpPicker, TextEdit};
use crate::host::EditorHost;

/// Prefix of the fully qualified command identifiers.
pub const COMMAND_PREFIX: &str = "vim-jumplist.";

/// Commands exposed to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Record the cursor as the newest jump point
    RegisterJump,
    /// Go to the previous jump point
    JumpBack,
    /// Go to the next jump point
    JumpForward,
    /// Open the jump point picker
    Jump,
    /// Forget every jump point
    Clear,
}

impl Command {
    pub const ALL: [Command; 5] = [
        Command::RegisterJump,
        Command::JumpBack,
        Command::JumpForward,
        Command::Jump,
        Command::Clear,
    ];

    /// Short name, e.g. `jumpBack`.
    pub fn name(&self) -> &'static str {
        match self {
            Command::RegisterJump => "registerJump",
            Command::JumpBack => "jumpBack",
            Command::JumpForward => "jumpForward",
            Command::Jump => "jump",
            Command::Clear => "clear",
        }
    }

    /// Fully qualified identifier, e.g. `vim-jumplist.jumpBack`.
    pub fn id(&self) -> String {
        format!("{}{}", COMMAND_PREFIX, self.name())
    }

    /// True for commands that act on the active editor's cursor.
    pub fn needs_editor(&self) -> bool {
        matches!(
            self,
            Command::RegisterJump | Command::JumpBack | Command::JumpForward
        )
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown command '{0}'")]
pub struct UnknownCommand(pub String);

impl FromStr for Command {
    type Err = UnknownCommand;

    /// Accepts both the short name and the prefixed identifier.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.strip_prefix(COMMAND_PREFIX).unwrap_or(s);
        Command::ALL
            .into_iter()
            .find(|command| command.name() == name)
            .ok_or_else(|| UnknownCommand(s.to_string()))
    }
}

/// What running a command produced.
#[derive(Debug, Clone)]
pub enum CommandOutput {
    /// The command ran to completion
    Outcome(JumpOutcome),
    /// The picker should be shown to the user
    Picker(JumpPicker),
}

impl CommandOutput {
    pub fn outcome(&self) -> Option<&JumpOutcome> {
        match self {
            CommandOutput::Outcome(outcome) => Some(outcome),
            CommandOutput::Picker(_) => None,
        }
    }
}

/// Runs `command` against `jumps`.
///
/// Editor commands report [`JumpOutcome::NoActiveEditor`] when the host has
/// no active editor.
pub fn execute<H: EditorHost + ?Sized>(
    command: Command,
    jumps: &mut JumpList,
    host: &mut H,
) -> CommandOutput {
    debug!("Execute command {}", command.id());

    let ctx = if command.needs_editor() {
        match host.active_editor() {
            Some(ctx) => Some(ctx),
            None => return CommandOutput::Outcome(JumpOutcome::NoActiveEditor),
        }
    } else {
        None
    };

    let outcome = match (command, ctx) {
        (Command::RegisterJump, Some(ctx)) => jumps.register(&ctx),
        (Command::JumpBack, Some(ctx)) => jumps.jump_back(&ctx, host),
        (Command::JumpForward, _) => jumps.jump_forward(host),
        (Command::Jump, _) => return CommandOutput::Picker(jumps.picker()),
        (Command::Clear, _) => jumps.clear(),
        (Command::RegisterJump | Command::JumpBack, None) => JumpOutcome::NoActiveEditor,
    };
    CommandOutput::Outcome(outcome)
}

/// Document notifications a host forwards to the jump list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentEvent {
    /// Content of `file` changed by an ordered batch of edits
    Changed { file: String, edits: Vec<TextEdit> },
    /// Files or directories were deleted
    Deleted { files: Vec<String> },
    /// Files or directories were renamed, as `(old, new)` pairs
    Renamed { pairs: Vec<(String, String)> },
}

/// Applies a document event to `jumps`. Returns the number of points affected.
///
/// For [`DocumentEvent::Changed`], `host` must already hold the edited text.
pub fn handle_event<H: EditorHost + ?Sized>(
    event: &DocumentEvent,
    jumps: &mut JumpList,
    host: &H,
) -> usize {
    let affected = match event {
        DocumentEvent::Changed { file, edits } => jumps.on_content_changed(file, edits, host),
        DocumentEvent::Deleted { files } => jumps.on_files_deleted(files),
        DocumentEvent::Renamed { pairs } => jumps.on_files_renamed(pairs),
    };
    if affected > 0 {
        debug!("{:?} affected {} jump point(s)", event, affected);
    }
    affected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;

    #[test]
    fn test_parse_short_and_prefixed_names() {
        assert_eq!("jumpBack".parse::<Command>(), Ok(Command::JumpBack));
        assert_eq!("vim-jumplist.registerJump".parse::<Command>(), Ok(Command::RegisterJump));
        assert_eq!(
            "jumpSideways".parse::<Command>(),
            Err(UnknownCommand("jumpSideways".to_string()))
        );
    }

    #[test]
    fn test_names_round_trip() {
        for command in Command::ALL {
            assert_eq!(command.id().parse::<Command>(), Ok(command));
        }
    }

    #[test]
    fn test_editor_commands_need_active_editor() {
        let mut host = MemoryHost::new();
        let mut jumps = JumpList::new(false);

        let output = execute(Command::RegisterJump, &mut jumps, &mut host);
        assert_eq!(output.outcome(), Some(&JumpOutcome::NoActiveEditor));
        assert!(jumps.is_empty());

        let output = execute(Command::Clear, &mut jumps, &mut host);
        assert_eq!(output.outcome(), Some(&JumpOutcome::Cleared));
    }

    #[test]
    fn test_jump_opens_picker() {
        let mut host = MemoryHost::new();
        host.open("a.txt", "hello").unwrap();
        let mut jumps = JumpList::new(false);
        execute(Command::RegisterJump, &mut jumps, &mut host);

        match execute(Command::Jump, &mut jumps, &mut host) {
            CommandOutput::Picker(picker) => assert_eq!(picker.len(), 2),
            other => panic!("expected picker, got {:?}", other),
        }
    }
}

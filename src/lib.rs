//! Vim-style jump list.
//!
//! Records cursor locations as the user moves around a set of documents and
//! lets them step back and forward through that history, or pick an entry
//! from a list. Recorded locations follow the text they point at: edits above
//! a location shift it, edits on its line snap it to the edit, renames move it
//! to the new file and deletions drop it.
//!
//! # Modules
//!
//! - `history`: the jump list itself and the data structures under it
//! - `host`: the editor surface the jump list reads from and navigates
//! - `commands`: host-facing commands and document events
//! - `config`: settings file
//! - `input`: script language for the command-line driver
//! - `ui`: terminal rendering of the picker
//!
//! # Example
//!
//! ```
//! use vim_jumplist::commands::{execute, Command, CommandOutput};
//! use vim_jumplist::history::{JumpList, JumpOutcome};
//! use vim_jumplist::host::MemoryHost;
//!
//! let mut host = MemoryHost::new();
//! host.open("notes.txt", "first\nsecond\n").unwrap();
//! let mut jumps = JumpList::new(false);
//!
//! execute(Command::RegisterJump, &mut jumps, &mut host);
//! assert_eq!(jumps.len(), 1);
//!
//! let output = execute(Command::JumpForward, &mut jumps, &mut host);
//! assert!(matches!(output, CommandOutput::Outcome(JumpOutcome::AtEnd)));
//! ```

pub mod commands;
pub mod config;
pub mod history;
pub mod host;
pub mod input;
pub mod ui;

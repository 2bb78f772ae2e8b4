//! The editor surface the jump list talks to.
//!
//! The jump list never reads buffers or moves the cursor itself. It asks an
//! [`EditorHost`] for the active cursor and for line text, and hands it the
//! locations to show. [`MemoryHost`] is a rope-backed implementation used by
//! the command-line driver and the tests.

pub mod memory;

use std::time::Duration;

use thiserror::Error;

use crate::history::point::{Location, Position};

pub use memory::{MemoryHost, Preview};

/// Snapshot of the active editor at the moment a command runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorContext {
    /// Identifier of the active document
    pub file: String,
    /// Cursor position, 0-based
    pub cursor: Position,
    /// Text of the cursor line
    pub line_text: String,
}

/// Errors reported by a host when a request cannot be carried out.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("no document named {0}")]
    UnknownDocument(String),

    #[error("a document named {0} is already open")]
    DocumentExists(String),

    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
}

/// Services a text editor provides to the jump list.
pub trait EditorHost {
    /// The active editor, or `None` if no document has focus.
    fn active_editor(&self) -> Option<EditorContext>;

    /// Opens `location.file` and puts the cursor at `location.range.start`.
    fn navigate(&mut self, location: &Location) -> Result<(), HostError>;

    /// Briefly highlights `location` without moving the cursor.
    ///
    /// A later preview supersedes an earlier one.
    fn preview(&mut self, location: &Location, duration: Duration) -> Result<(), HostError>;

    /// Current text of `line` in `file`, without its line ending.
    fn line_text(&self, file: &str, line: usize) -> Option<String>;
}

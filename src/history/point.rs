//! Recorded locations and the positions they are built from.

use std::fmt;
use std::time::Duration;

use log::warn;

use crate::host::{EditorContext, EditorHost};

/// A 0-based line/column pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A span between two positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Zero-width range at `position`.
    pub fn empty(position: Position) -> Self {
        Self::new(position, position)
    }

    /// Moves both ends by `delta` lines, keeping their columns.
    pub fn shifted(&self, delta: isize) -> Self {
        Self {
            start: Position::new(self.start.line.saturating_add_signed(delta), self.start.column),
            end: Position::new(self.end.line.saturating_add_signed(delta), self.end.column),
        }
    }
}

/// A range inside a named file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub file: String,
    pub range: Range,
}

impl Location {
    pub fn new(file: impl Into<String>, range: Range) -> Self {
        Self {
            file: file.into(),
            range,
        }
    }

    /// Last path segment of the file identifier.
    pub fn basename(&self) -> &str {
        self.file
            .rsplit(['/', '\\'])
            .find(|segment| !segment.is_empty())
            .unwrap_or(&self.file)
    }
}

impl fmt::Display for Location {
    /// Formats as `"file" line:col`, 1-based.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} {}:{}",
            self.file,
            self.range.start.line + 1,
            self.range.start.column + 1
        )
    }
}

/// One entry of the jump history.
///
/// Two points are equal when their locations are equal; the cached line
/// text takes no part in the comparison.
#[derive(Debug, Clone)]
pub struct JumpPoint {
    location: Location,
    /// Trimmed text of the start line, refreshed when the point is snapped
    line_text: String,
}

impl JumpPoint {
    pub fn new(location: Location, line_text: impl Into<String>) -> Self {
        Self {
            location,
            line_text: line_text.into().trim().to_string(),
        }
    }

    /// Builds a zero-width point at the cursor of the active editor.
    pub fn current_point(ctx: &EditorContext) -> Self {
        Self::new(
            Location::new(ctx.file.clone(), Range::empty(ctx.cursor)),
            ctx.line_text.as_str(),
        )
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn line_text(&self) -> &str {
        &self.line_text
    }

    /// Moves the point in place.
    pub fn relocate(&mut self, location: Location, line_text: impl Into<String>) {
        self.location = location;
        self.line_text = line_text.into().trim().to_string();
    }

    /// Moves the point to another range in the same file, keeping its text.
    pub fn set_range(&mut self, range: Range) {
        self.location.range = range;
    }

    /// Points the entry at a different file, keeping its range.
    pub fn set_file(&mut self, file: impl Into<String>) {
        self.location.file = file.into();
    }

    /// Asks the host to show this location with the cursor at its start.
    ///
    /// Returns false if the host refused; the failure is only logged.
    pub fn jump<H: EditorHost + ?Sized>(&self, host: &mut H) -> bool {
        let target = Location::new(self.location.file.clone(), Range::empty(self.location.range.start));
        match host.navigate(&target) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to jump to {}: {}", self, e);
                false
            }
        }
    }

    /// Asks the host to briefly highlight this location without moving there.
    pub fn peek<H: EditorHost + ?Sized>(&self, host: &mut H, duration: Duration) -> bool {
        match host.preview(&self.location, duration) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to preview {}: {}", self, e);
                false
            }
        }
    }
}

impl PartialEq for JumpPoint {
    fn eq(&self, other: &Self) -> bool {
        self.location == other.location
    }
}

impl Eq for JumpPoint {}

impl fmt::Display for JumpPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.location, f)
    }
}

//! In-memory editor host backed by ropes.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use ropey::Rope;

use super::{EditorContext, EditorHost, HostError};
use crate::history::point::{Location, Position, Range};
use crate::history::rebase::{is_within, renamed_path, TextEdit};

/// The most recent preview request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub location: Location,
    pub duration: Duration,
}

/// A set of named documents with one active cursor.
///
/// Navigation clamps the cursor into the document, the way a real editor
/// does when a remembered position is past the end of a shrunk file.
#[derive(Debug, Default)]
pub struct MemoryHost {
    documents: BTreeMap<String, Rope>,
    active: Option<(String, Position)>,
    last_preview: Option<Preview>,
    /// Every location navigated to, oldest first
    navigations: Vec<Location>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document and makes it active with the cursor at the top.
    pub fn open(&mut self, id: impl Into<String>, text: &str) -> Result<(), HostError> {
        let id = id.into();
        if self.documents.contains_key(&id) {
            return Err(HostError::DocumentExists(id));
        }
        self.documents.insert(id.clone(), Rope::from_str(text));
        self.active = Some((id, Position::default()));
        Ok(())
    }

    /// Reads a file from disk and opens it under its path.
    ///
    /// Re-opening a file that is already loaded just activates it.
    pub fn open_file(&mut self, path: &Path) -> Result<(), HostError> {
        let id = path.to_string_lossy().into_owned();
        if self.documents.contains_key(&id) {
            self.active = Some((id, Position::default()));
            return Ok(());
        }
        let text = std::fs::read_to_string(path).map_err(|source| HostError::Read {
            path: id.clone(),
            source,
        })?;
        self.open(id, &text)
    }

    /// Moves the cursor of the active document.
    pub fn set_cursor(&mut self, position: Position) -> Result<(), HostError> {
        let Some((file, _)) = &self.active else {
            return Err(HostError::UnknownDocument(String::new()));
        };
        let file = file.clone();
        let rope = self.rope(&file)?;
        let clamped = clamp(rope, position);
        self.active = Some((file, clamped));
        Ok(())
    }

    /// Identifier of the active document.
    pub fn active_file(&self) -> Option<&str> {
        self.active.as_ref().map(|(file, _)| file.as_str())
    }

    /// Cursor of the active document.
    pub fn cursor(&self) -> Option<Position> {
        self.active.as_ref().map(|(_, cursor)| *cursor)
    }

    /// Full text of a document.
    pub fn text(&self, id: &str) -> Option<String> {
        self.documents.get(id).map(|rope| rope.to_string())
    }

    /// Returns true if a document with this identifier is open.
    pub fn contains(&self, id: &str) -> bool {
        self.documents.contains_key(id)
    }

    pub fn last_preview(&self) -> Option<&Preview> {
        self.last_preview.as_ref()
    }

    pub fn navigations(&self) -> &[Location] {
        &self.navigations
    }

    /// Applies `edits` in order, each against the text left by the previous one.
    pub fn apply_edits(&mut self, id: &str, edits: &[TextEdit]) -> Result<(), HostError> {
        let rope = self
            .documents
            .get_mut(id)
            .ok_or_else(|| HostError::UnknownDocument(id.to_string()))?;

        for edit in edits {
            let mut start = char_index(rope, edit.range.start);
            let mut end = char_index(rope, edit.range.end);
            if end < start {
                std::mem::swap(&mut start, &mut end);
            }
            rope.remove(start..end);
            rope.insert(start, &edit.text);
        }

        if let Some((file, cursor)) = &self.active {
            if file == id {
                let clamped = clamp(rope, *cursor);
                self.active = Some((file.clone(), clamped));
            }
        }
        Ok(())
    }

    /// Replaces whole lines `first..=last` (0-based) of a document with `text`.
    ///
    /// Returns the edit that was applied, ready to be reported to the jump list.
    pub fn replace_lines(
        &mut self,
        id: &str,
        first: usize,
        last: usize,
        text: &str,
    ) -> Result<TextEdit, HostError> {
        let rope = self.rope(id)?;
        let max_line = rope.len_lines().saturating_sub(1);
        let first = first.min(max_line);
        let last = last.clamp(first, max_line);
        let edit = TextEdit::new(
            Range::new(
                Position::new(first, 0),
                Position::new(last, line_len(rope, last)),
            ),
            text,
        );
        self.apply_edits(id, std::slice::from_ref(&edit))?;
        Ok(edit)
    }

    /// Renames a document, or every document under a directory prefix.
    ///
    /// Returns the `(old, new)` pairs that were applied.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<Vec<(String, String)>, HostError> {
        let pairs: Vec<(String, String)> = self
            .documents
            .keys()
            .filter_map(|id| renamed_path(id, old, new).map(|renamed| (id.clone(), renamed)))
            .collect();
        if pairs.is_empty() {
            return Err(HostError::UnknownDocument(old.to_string()));
        }
        if let Some((_, taken)) = pairs.iter().find(|(_, to)| self.documents.contains_key(to)) {
            return Err(HostError::DocumentExists(taken.clone()));
        }

        for (from, to) in &pairs {
            if let Some(rope) = self.documents.remove(from) {
                self.documents.insert(to.clone(), rope);
            }
            if let Some((file, _)) = &mut self.active {
                if file == from {
                    *file = to.clone();
                }
            }
        }
        Ok(pairs)
    }

    /// Closes a document, or every document under a directory prefix.
    ///
    /// Returns the identifiers that were removed.
    pub fn delete(&mut self, target: &str) -> Result<Vec<String>, HostError> {
        let doomed: Vec<String> = self
            .documents
            .keys()
            .filter(|id| is_within(id, target))
            .cloned()
            .collect();
        if doomed.is_empty() {
            return Err(HostError::UnknownDocument(target.to_string()));
        }

        for id in &doomed {
            self.documents.remove(id);
        }
        if self
            .active
            .as_ref()
            .is_some_and(|(file, _)| doomed.contains(file))
        {
            self.active = None;
        }
        Ok(doomed)
    }

    fn rope(&self, id: &str) -> Result<&Rope, HostError> {
        self.documents
            .get(id)
            .ok_or_else(|| HostError::UnknownDocument(id.to_string()))
    }
}

impl EditorHost for MemoryHost {
    fn active_editor(&self) -> Option<EditorContext> {
        let (file, cursor) = self.active.as_ref()?;
        let line_text = self.line_text(file, cursor.line).unwrap_or_default();
        Some(EditorContext {
            file: file.clone(),
            cursor: *cursor,
            line_text,
        })
    }

    fn navigate(&mut self, location: &Location) -> Result<(), HostError> {
        let rope = self.rope(&location.file)?;
        let cursor = clamp(rope, location.range.start);
        self.active = Some((location.file.clone(), cursor));
        self.navigations.push(location.clone());
        Ok(())
    }

    fn preview(&mut self, location: &Location, duration: Duration) -> Result<(), HostError> {
        self.rope(&location.file)?;
        self.last_preview = Some(Preview {
            location: location.clone(),
            duration,
        });
        Ok(())
    }

    fn line_text(&self, file: &str, line: usize) -> Option<String> {
        let rope = self.documents.get(file)?;
        if line >= rope.len_lines() {
            return None;
        }
        let slice = rope.line(line);
        Some(slice.slice(..line_len(rope, line)).to_string())
    }
}

/// Length of `line` in chars, excluding its line ending.
fn line_len(rope: &Rope, line: usize) -> usize {
    let slice = rope.line(line);
    let mut len = slice.len_chars();
    while len > 0 && matches!(slice.char(len - 1), '\n' | '\r') {
        len -= 1;
    }
    len
}

fn clamp(rope: &Rope, position: Position) -> Position {
    let line = position.line.min(rope.len_lines().saturating_sub(1));
    Position::new(line, position.column.min(line_len(rope, line)))
}

fn char_index(rope: &Rope, position: Position) -> usize {
    let position = clamp(rope, position);
    rope.line_to_char(position.line) + position.column
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host_with(text: &str) -> MemoryHost {
        let mut host = MemoryHost::new();
        host.open("doc.txt", text).unwrap();
        host
    }

    #[test]
    fn test_active_editor_reports_cursor_line() {
        let mut host = host_with("one\n  two\nthree\n");
        host.set_cursor(Position::new(1, 3)).unwrap();
        let ctx = host.active_editor().unwrap();
        assert_eq!(ctx.file, "doc.txt");
        assert_eq!(ctx.cursor, Position::new(1, 3));
        assert_eq!(ctx.line_text, "  two");
    }

    #[test]
    fn test_cursor_is_clamped() {
        let mut host = host_with("ab\ncd");
        host.set_cursor(Position::new(9, 9)).unwrap();
        assert_eq!(host.cursor(), Some(Position::new(1, 2)));
    }

    #[test]
    fn test_replace_lines() {
        let mut host = host_with("a\nb\nc\nd\n");
        let edit = host.replace_lines("doc.txt", 1, 2, "x\ny\nz").unwrap();
        assert_eq!(edit.line_delta(), 1);
        assert_eq!(host.text("doc.txt").unwrap(), "a\nx\ny\nz\nd\n");
    }

    #[test]
    fn test_rename_directory_prefix() {
        let mut host = MemoryHost::new();
        host.open("src/a.rs", "a").unwrap();
        host.open("src/b.rs", "b").unwrap();
        let pairs = host.rename("src", "lib").unwrap();
        assert_eq!(pairs.len(), 2);
        assert!(host.contains("lib/a.rs"));
        assert_eq!(host.active_file(), Some("lib/b.rs"));
    }

    #[test]
    fn test_delete_clears_active() {
        let mut host = host_with("text");
        host.delete("doc.txt").unwrap();
        assert!(host.active_editor().is_none());
        assert!(matches!(
            host.delete("doc.txt"),
            Err(HostError::UnknownDocument(_))
        ));
    }

    #[test]
    fn test_navigate_unknown_document_fails() {
        let mut host = MemoryHost::new();
        let location = Location::new("missing", Range::default());
        assert!(host.navigate(&location).is_err());
        assert!(host.navigations().is_empty());
    }
}

//! Keeping recorded locations in step with edits, renames and deletions.
//!
//! Edits arrive as an ordered batch. Each edit is applied to a point as the
//! previous edit left it, so a batch folds left to right:
//!
//! - an edit whose line span contains the point's line snaps the point to the
//!   edit's start,
//! - an edit entirely above the point shifts it by the net number of lines
//!   the edit added or removed,
//! - an edit below the point leaves it alone.
//!
//! A snapped point re-reads its line text from the host after the whole
//! batch is folded, at the line it finally landed on.

use super::point::{JumpPoint, Range};
use crate::host::EditorHost;

/// Replacement of `range` (pre-edit coordinates) by `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub range: Range,
    pub text: String,
}

impl TextEdit {
    pub fn new(range: Range, text: impl Into<String>) -> Self {
        Self {
            range,
            text: text.into(),
        }
    }

    /// Number of lines the replacement text spans.
    pub fn replacement_lines(&self) -> usize {
        self.text.split('\n').count()
    }

    /// Number of lines of the document the edit replaces.
    pub fn replaced_lines(&self) -> usize {
        self.range.end.line.saturating_sub(self.range.start.line) + 1
    }

    /// Net change in line count for text below the edit.
    pub fn line_delta(&self) -> isize {
        self.replacement_lines() as isize - self.replaced_lines() as isize
    }

    /// True if `line` lies within the edit's line span.
    pub fn touches_line(&self, line: usize) -> bool {
        self.range.start.line <= line && line <= self.range.end.line
    }
}

/// How a single edit affected a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebaseEffect {
    Unchanged,
    Shifted,
    Snapped,
}

/// Folds `edits` over `point`. Returns true if the point moved.
///
/// The caller is responsible for only passing points of the edited file.
pub fn rebase_point<H: EditorHost + ?Sized>(point: &mut JumpPoint, edits: &[TextEdit], host: &H) -> bool {
    let (moved, snapped) = edits
        .iter()
        .map(|edit| apply_edit(point, edit))
        .fold((false, false), |(moved, snapped), effect| {
            (
                moved || effect != RebaseEffect::Unchanged,
                snapped || effect == RebaseEffect::Snapped,
            )
        });

    if snapped {
        let location = point.location().clone();
        let text = host
            .line_text(&location.file, location.range.start.line)
            .unwrap_or_default();
        point.relocate(location, text);
    }
    moved
}

/// Applies one edit to the position of `point`, leaving its text alone.
pub fn apply_edit(point: &mut JumpPoint, edit: &TextEdit) -> RebaseEffect {
    let line = point.location().range.start.line;

    if edit.touches_line(line) {
        point.set_range(Range::empty(edit.range.start));
        return RebaseEffect::Snapped;
    }

    if edit.range.end.line < line {
        let delta = edit.line_delta();
        if delta != 0 {
            let shifted = point.location().range.shifted(delta);
            point.set_range(shifted);
            return RebaseEffect::Shifted;
        }
    }

    RebaseEffect::Unchanged
}

/// True if `file` is `target` itself or lives under the directory `target`.
pub fn is_within(file: &str, target: &str) -> bool {
    file == target
        || file
            .strip_prefix(target)
            .is_some_and(|rest| rest.starts_with('/') && !target.is_empty())
}

/// The new identifier of `file` after `old` was renamed to `new`, if affected.
pub fn renamed_path(file: &str, old: &str, new: &str) -> Option<String> {
    if file == old {
        return Some(new.to_string());
    }
    if old.is_empty() {
        return None;
    }
    file.strip_prefix(old)
        .filter(|rest| rest.starts_with('/'))
        .map(|rest| format!("{}{}", new, rest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::point::{Location, Position};
    use crate::host::MemoryHost;

    fn point_at(line: usize, column: usize) -> JumpPoint {
        JumpPoint::new(Location::new("a.txt", Range::empty(Position::new(line, column))), "")
    }

    fn lines_edit(start: usize, end: usize, text: &str) -> TextEdit {
        TextEdit::new(
            Range::new(Position::new(start, 0), Position::new(end, 0)),
            text,
        )
    }

    #[test]
    fn test_line_delta() {
        assert_eq!(lines_edit(1, 2, "a\nb\nc\nd").line_delta(), 2);
        assert_eq!(lines_edit(1, 3, "x").line_delta(), -2);
        assert_eq!(lines_edit(4, 4, "y").line_delta(), 0);
        assert_eq!(lines_edit(4, 4, "").line_delta(), 0);
    }

    #[test]
    fn test_edit_below_is_ignored() {
        let mut p = point_at(3, 2);
        let effect = apply_edit(&mut p, &lines_edit(5, 6, "a\nb\nc"));
        assert_eq!(effect, RebaseEffect::Unchanged);
        assert_eq!(p.location().range.start, Position::new(3, 2));
    }

    #[test]
    fn test_same_length_edit_above_is_ignored() {
        let mut p = point_at(9, 2);
        let effect = apply_edit(&mut p, &lines_edit(1, 2, "a\nb"));
        assert_eq!(effect, RebaseEffect::Unchanged);
    }

    #[test]
    fn test_batch_folds_left_to_right() {
        let host = MemoryHost::new();
        let mut p = point_at(10, 4);
        // First edit moves the point to line 12, the second only touches
        // line 12 because of the first.
        let edits = [lines_edit(1, 2, "a\nb\nc\nd"), lines_edit(12, 12, "z")];
        assert!(rebase_point(&mut p, &edits, &host));
        assert_eq!(p.location().range.start, Position::new(12, 0));
    }

    #[test]
    fn test_is_within() {
        assert!(is_within("src/a.rs", "src/a.rs"));
        assert!(is_within("src/a.rs", "src"));
        assert!(!is_within("srcs/a.rs", "src"));
        assert!(!is_within("src/a.rs", ""));
    }

    #[test]
    fn test_renamed_path() {
        assert_eq!(renamed_path("a.rs", "a.rs", "b.rs"), Some("b.rs".to_string()));
        assert_eq!(
            renamed_path("old/x/a.rs", "old", "new"),
            Some("new/x/a.rs".to_string())
        );
        assert_eq!(renamed_path("older/a.rs", "old", "new"), None);
    }
}

//! Choice list for picking a jump point interactively.
//!
//! Entries are split in two groups around the current position, each listed
//! nearest first:
//!
//! - `Before`: older entries, walking back from the one before the cursor
//!   (from the newest entry when live),
//! - `CurrentAndAfter`: the current entry and the newer ones. When live this
//!   group holds a single blank entry standing for the live position.
//!
//! The index column is the distance from the current position, so the
//! picker reads like `:jumps` in vim.

use super::linked_list::{LinkedList, NodeId};
use super::point::{JumpPoint, Location};

/// Which side of the current position an entry is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerGroup {
    Before,
    CurrentAndAfter,
}

/// One row of the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerEntry {
    /// History node, `None` for the live entry
    pub node: Option<NodeId>,
    pub group: PickerGroup,
    /// Steps from the current position
    pub distance: usize,
    /// Location at the time the picker was built
    pub location: Option<Location>,
    /// `<index>: Ln <line> , Col <col>  <basename>`, padded
    pub label: String,
    /// Cached line text of the point
    pub detail: String,
}

impl PickerEntry {
    /// True for the blank entry standing for the live position.
    pub fn is_live(&self) -> bool {
        self.node.is_none()
    }
}

/// Column widths shared by every label of one picker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Widths {
    index: usize,
    line: usize,
    column: usize,
}

/// Snapshot of the history as a navigable choice list.
///
/// The picker holds node handles, not references, so the history stays
/// mutable while it is open. Handles of points removed in the meantime are
/// rejected when the selection is used.
#[derive(Debug, Clone)]
pub struct JumpPicker {
    entries: Vec<PickerEntry>,
    selected: usize,
}

impl JumpPicker {
    pub(crate) fn build(list: &LinkedList<JumpPoint>, current: Option<NodeId>) -> Self {
        let before_start = match current {
            Some(current) => list.prev(current),
            None => list.tail(),
        };
        let before: Vec<(NodeId, &JumpPoint)> = before_start
            .map(|start| list.iter_prev(start).collect())
            .unwrap_or_default();
        let after: Vec<Option<(NodeId, &JumpPoint)>> = match current {
            Some(current) => list.iter_next(current).map(Some).collect(),
            None => vec![None],
        };

        let rows = before
            .iter()
            .enumerate()
            .map(|(i, &(id, point))| (PickerGroup::Before, i + 1, Some((id, point))))
            .chain(
                after
                    .iter()
                    .enumerate()
                    .map(|(i, &entry)| (PickerGroup::CurrentAndAfter, i, entry)),
            )
            .collect::<Vec<_>>();

        let widths = rows.iter().fold(Widths::default(), |w, (_, distance, entry)| {
            let index = digits(*distance).max(w.index);
            match entry {
                Some((_, point)) => {
                    let start = point.location().range.start;
                    Widths {
                        index,
                        line: digits(start.line + 1).max(w.line),
                        column: digits(start.column + 1).max(w.column),
                    }
                }
                None => Widths { index, ..w },
            }
        });

        let entries = rows
            .into_iter()
            .map(|(group, distance, entry)| match entry {
                Some((id, point)) => PickerEntry {
                    node: Some(id),
                    group,
                    distance,
                    location: Some(point.location().clone()),
                    label: format_label(distance, point.location(), widths),
                    detail: point.line_text().to_string(),
                },
                None => PickerEntry {
                    node: None,
                    group,
                    distance,
                    location: None,
                    label: String::new(),
                    detail: String::new(),
                },
            })
            .collect();

        Self {
            entries,
            selected: before.len(),
        }
    }

    /// All rows, `Before` group first.
    pub fn entries(&self) -> &[PickerEntry] {
        &self.entries
    }

    /// Rows of one group, nearest first.
    pub fn group(&self, group: PickerGroup) -> impl Iterator<Item = &PickerEntry> {
        self.entries.iter().filter(move |entry| entry.group == group)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// The highlighted row.
    pub fn selected(&self) -> Option<&PickerEntry> {
        self.entries.get(self.selected)
    }

    /// Highlights row `index`. Returns false if there is no such row.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.entries.len() {
            return false;
        }
        self.selected = index;
        true
    }

    /// Moves the highlight down one row. Returns false at the last row.
    pub fn select_next(&mut self) -> bool {
        self.select(self.selected + 1)
    }

    /// Moves the highlight up one row. Returns false at the first row.
    pub fn select_previous(&mut self) -> bool {
        match self.selected.checked_sub(1) {
            Some(index) => self.select(index),
            None => false,
        }
    }
}

fn format_label(distance: usize, location: &Location, widths: Widths) -> String {
    let start = location.range.start;
    format!(
        "{:>iw$}: Ln {:>lw$} , Col {:>cw$}  {}",
        distance,
        start.line + 1,
        start.column + 1,
        location.basename(),
        iw = widths.index,
        lw = widths.line,
        cw = widths.column,
    )
}

fn digits(n: usize) -> usize {
    n.to_string().len()
}

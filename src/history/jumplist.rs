//! The navigation engine: history, current cursor and back/forward movement.

use std::time::Duration;

use log::{debug, info};

use super::linked_list::{LinkedList, NodeId};
use super::outcome::JumpOutcome;
use super::picker::JumpPicker;
use super::point::{JumpPoint, Location};
use super::rebase::{is_within, rebase_point, renamed_path, TextEdit};
use crate::config::Config;
use crate::host::{EditorContext, EditorHost};

/// Maximum number of entries kept in the history.
pub const MAX_LENGTH: usize = 100;

/// Cursor position history for back/forward navigation.
///
/// The history is a linked list of [`JumpPoint`]s with a `current` cursor
/// into it. A cursor of `None` means the user is at the live edit point and
/// not replaying history. Registering a point always returns to live; the
/// first step back from live records where the user was, so stepping forward
/// again can return there.
///
/// With stack mode enabled, registering while replaying history discards
/// every entry after the current one, like a browser dropping its forward
/// history when a new page is visited.
///
/// # Example
///
/// ```
/// use vim_jumplist::history::JumpList;
/// use vim_jumplist::host::{EditorHost, MemoryHost};
/// use vim_jumplist::history::point::Position;
///
/// let mut host = MemoryHost::new();
/// host.open("notes.txt", "one\ntwo\nthree\n").unwrap();
/// let mut jumps = JumpList::new(false);
///
/// jumps.register(&host.active_editor().unwrap());
/// host.set_cursor(Position::new(2, 0)).unwrap();
///
/// let ctx = host.active_editor().unwrap();
/// jumps.jump_back(&ctx, &mut host);
/// assert_eq!(host.cursor(), Some(Position::new(0, 0)));
/// ```
#[derive(Debug)]
pub struct JumpList {
    list: LinkedList<JumpPoint>,
    current: Option<NodeId>,
    stack_mode: bool,
    preview_duration: Duration,
}

impl JumpList {
    /// Creates an empty jump list.
    pub fn new(stack_mode: bool) -> Self {
        Self {
            list: LinkedList::new(),
            current: None,
            stack_mode,
            preview_duration: Duration::from_millis(crate::config::DEFAULT_PREVIEW_MS),
        }
    }

    /// Creates an empty jump list using the configured settings.
    pub fn from_config(config: &Config) -> Self {
        Self {
            preview_duration: config.preview_duration(),
            ..Self::new(config.stack_mode)
        }
    }

    /// Returns the number of recorded points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns true if nothing is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns true when not replaying history.
    pub fn is_live(&self) -> bool {
        self.current.is_none()
    }

    /// The point the cursor is on, or `None` when live.
    pub fn current(&self) -> Option<&JumpPoint> {
        self.current.and_then(|id| self.list.get(id))
    }

    /// Position of the cursor counted from the oldest entry, or `None` when live.
    pub fn current_index(&self) -> Option<usize> {
        let current = self.current?;
        self.list.iter_head().position(|(id, _)| id == current)
    }

    /// Recorded points, oldest first.
    pub fn points(&self) -> impl Iterator<Item = &JumpPoint> {
        self.list.iter_head().map(|(_, point)| point)
    }

    pub fn stack_mode(&self) -> bool {
        self.stack_mode
    }

    pub fn set_stack_mode(&mut self, enabled: bool) {
        self.stack_mode = enabled;
    }

    pub fn preview_duration(&self) -> Duration {
        self.preview_duration
    }

    /// Records the cursor of `ctx` as the newest entry.
    ///
    /// An existing entry at the same location is moved to the end instead of
    /// being duplicated. Leaves the cursor live.
    pub fn register(&mut self, ctx: &EditorContext) -> JumpOutcome {
        let point = JumpPoint::current_point(ctx);

        if self.stack_mode {
            if let Some(current) = self.current {
                self.truncate_after(current);
            }
        }

        let duplicates: Vec<NodeId> = self
            .list
            .iter_head()
            .filter(|(_, existing)| **existing == point)
            .map(|(id, _)| id)
            .collect();
        for id in duplicates {
            debug!("Drop duplicate jump point: {}", point);
            self.remove_node(id);
        }

        self.list.push_back(point.clone());
        self.enforce_capacity();
        self.current = None;

        info!("Register jump point: {}", point);
        JumpOutcome::Registered(point)
    }

    /// Steps one entry towards older history and navigates there.
    ///
    /// Stepping back from the live position first records it as the newest
    /// entry.
    pub fn jump_back<H: EditorHost + ?Sized>(
        &mut self,
        ctx: &EditorContext,
        host: &mut H,
    ) -> JumpOutcome {
        // Also covers the empty list, where both are None
        if self.current == self.list.head() {
            info!("Already at the beginning of the jump list.");
            return JumpOutcome::AtBeginning;
        }

        let from = match self.current {
            Some(current) => current,
            None => {
                let point = JumpPoint::current_point(ctx);
                debug!("Record live position: {}", point);
                self.list.push_back(point);
                self.enforce_capacity();
                let Some(tail) = self.list.tail() else {
                    return JumpOutcome::AtBeginning;
                };
                self.current = Some(tail);
                tail
            }
        };

        let Some(target) = self.list.prev(from) else {
            info!("Already at the beginning of the jump list.");
            return JumpOutcome::AtBeginning;
        };
        self.current = Some(target);

        match self.navigate(target, host) {
            Some(location) => {
                info!("Jump back to: {}", location);
                JumpOutcome::JumpedBack(location)
            }
            None => JumpOutcome::AtBeginning,
        }
    }

    /// Steps one entry towards newer history and navigates there.
    pub fn jump_forward<H: EditorHost + ?Sized>(&mut self, host: &mut H) -> JumpOutcome {
        let Some(target) = self.current.and_then(|current| self.list.next(current)) else {
            info!("Already at the end of the jump list.");
            return JumpOutcome::AtEnd;
        };
        self.current = Some(target);

        match self.navigate(target, host) {
            Some(location) => {
                info!("Jump forward to: {}", location);
                JumpOutcome::JumpedForward(location)
            }
            None => JumpOutcome::AtEnd,
        }
    }

    /// Builds the choice list for the interactive picker.
    pub fn picker(&self) -> JumpPicker {
        JumpPicker::build(&self.list, self.current)
    }

    /// Previews the entry highlighted in `picker`.
    ///
    /// Returns false if the highlight is on the live entry or on a point that
    /// has since been removed.
    pub fn peek<H: EditorHost + ?Sized>(&self, picker: &JumpPicker, host: &mut H) -> bool {
        let Some(point) = picker
            .selected()
            .and_then(|entry| entry.node)
            .and_then(|id| self.list.get(id))
        else {
            return false;
        };
        debug!("Peek: {}", point);
        point.peek(host, self.preview_duration)
    }

    /// Moves the cursor to the entry highlighted in `picker` and navigates there.
    pub fn accept<H: EditorHost + ?Sized>(&mut self, picker: &JumpPicker, host: &mut H) -> JumpOutcome {
        let Some(entry) = picker.selected() else {
            return JumpOutcome::Gone;
        };
        let Some(id) = entry.node else {
            self.current = None;
            info!("Back at the live position.");
            return JumpOutcome::Live;
        };
        if !self.list.contains(id) {
            debug!("Picked jump point was removed while the picker was open");
            return JumpOutcome::Gone;
        }

        self.current = Some(id);
        match self.navigate(id, host) {
            Some(location) => {
                info!("Jump to: {}", location);
                JumpOutcome::Picked(location)
            }
            None => JumpOutcome::Gone,
        }
    }

    /// Forgets every entry and returns to live.
    pub fn clear(&mut self) -> JumpOutcome {
        self.list.clear();
        self.current = None;
        info!("Jump list cleared.");
        JumpOutcome::Cleared
    }

    /// Rebases every point in `file` over an ordered batch of edits.
    ///
    /// `host` must already reflect the edits; snapped points read their new
    /// line text from it. Returns the number of points that moved.
    pub fn on_content_changed<H: EditorHost + ?Sized>(
        &mut self,
        file: &str,
        edits: &[TextEdit],
        host: &H,
    ) -> usize {
        if edits.is_empty() {
            return 0;
        }

        let mut moved = 0;
        for point in self.list.values_mut() {
            if point.location().file == file && rebase_point(point, edits, host) {
                debug!("Rebased jump point: {}", point);
                moved += 1;
            }
        }
        moved
    }

    /// Removes every point in the deleted files or directories.
    ///
    /// Returns the number of points removed.
    pub fn on_files_deleted(&mut self, files: &[String]) -> usize {
        let removed = self.list.remove_where(|point| {
            files
                .iter()
                .any(|deleted| is_within(&point.location().file, deleted))
        });

        if let Some(current) = self.current {
            if removed.iter().any(|(id, _)| *id == current) {
                debug!("Current jump point was deleted, returning to live");
                self.current = None;
            }
        }
        for (_, point) in &removed {
            info!("Remove jump point: {}", point);
        }
        removed.len()
    }

    /// Moves points of renamed files or directories to their new names.
    ///
    /// Returns the number of points updated.
    pub fn on_files_renamed(&mut self, pairs: &[(String, String)]) -> usize {
        let mut renamed = 0;
        for point in self.list.values_mut() {
            let new_file = pairs
                .iter()
                .find_map(|(old, new)| renamed_path(&point.location().file, old, new));
            if let Some(new_file) = new_file {
                point.set_file(new_file);
                debug!("Renamed jump point: {}", point);
                renamed += 1;
            }
        }
        renamed
    }

    fn navigate<H: EditorHost + ?Sized>(
        &self,
        id: NodeId,
        host: &mut H,
    ) -> Option<Location> {
        let point = self.list.get(id)?;
        point.jump(host);
        Some(point.location().clone())
    }

    /// Removes a node, detaching the cursor if it pointed there.
    fn remove_node(&mut self, id: NodeId) -> Option<JumpPoint> {
        if self.current == Some(id) {
            self.current = None;
        }
        self.list.remove(id)
    }

    /// Removes every node after `id`.
    fn truncate_after(&mut self, id: NodeId) {
        let forward: Vec<NodeId> = self.list.iter_next(id).skip(1).map(|(id, _)| id).collect();
        if !forward.is_empty() {
            debug!("Discard {} forward jump point(s)", forward.len());
        }
        for id in forward {
            self.remove_node(id);
        }
    }

    /// Evicts the oldest entries until the list fits.
    fn enforce_capacity(&mut self) {
        while self.list.len() > MAX_LENGTH {
            let Some(head) = self.list.head() else {
                break;
            };
            if let Some(point) = self.remove_node(head) {
                debug!("Evict oldest jump point: {}", point);
            }
        }
    }
}

impl Default for JumpList {
    fn default() -> Self {
        Self::new(false)
    }
}

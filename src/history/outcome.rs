//! Results of navigation operations and the messages shown for them.

use super::point::{JumpPoint, Location};

/// Message severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Warning,
}

/// Represents a message to display to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub level: MessageLevel,
}

impl Message {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: MessageLevel::Info,
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: MessageLevel::Warning,
        }
    }
}

/// What a jump list operation did.
///
/// None of these are failures: reaching either end of the history or
/// having no editor open are ordinary outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JumpOutcome {
    /// A point was added at the end of the history
    Registered(JumpPoint),
    /// Moved one step towards older entries
    JumpedBack(Location),
    /// Moved one step towards newer entries
    JumpedForward(Location),
    /// Moved to an entry chosen from the picker
    Picked(Location),
    /// Picker selection was the live position; the cursor is detached
    Live,
    /// Picker selection no longer exists in the history
    Gone,
    /// Already at the oldest entry
    AtBeginning,
    /// Already at the newest entry, or not navigating the history
    AtEnd,
    /// History emptied
    Cleared,
    /// Command needs an editor and none is active
    NoActiveEditor,
}

impl JumpOutcome {
    /// The message to show the user for this outcome.
    pub fn message(&self) -> Message {
        match self {
            JumpOutcome::Registered(point) => Message::info(format!("Register jump point: {}", point)),
            JumpOutcome::JumpedBack(location) => Message::info(format!("Jump back to: {}", location)),
            JumpOutcome::JumpedForward(location) => {
                Message::info(format!("Jump forward to: {}", location))
            }
            JumpOutcome::Picked(location) => Message::info(format!("Jump to: {}", location)),
            JumpOutcome::Live => Message::info("Back at the live position."),
            JumpOutcome::Gone => Message::warning("That jump point no longer exists."),
            JumpOutcome::AtBeginning => Message::info("Already at the beginning of the jump list."),
            JumpOutcome::AtEnd => Message::info("Already at the end of the jump list."),
            JumpOutcome::Cleared => Message::info("Jump list cleared."),
            JumpOutcome::NoActiveEditor => Message::warning("No active editor."),
        }
    }

    /// Returns the location the host was asked to show, if any.
    pub fn target(&self) -> Option<&Location> {
        match self {
            JumpOutcome::JumpedBack(location)
            | JumpOutcome::JumpedForward(location)
            | JumpOutcome::Picked(location) => Some(location),
            _ => None,
        }
    }
}

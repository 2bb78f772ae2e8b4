//! Jump history: recorded locations, navigation over them, and keeping them
//! valid while the underlying documents change.
//!
//! # Modules
//!
//! - `linked_list`: arena-backed doubly linked list with stable node handles
//! - `point`: positions, locations and the recorded jump point
//! - `rebase`: adjusting points for edits, renames and deletions
//! - `jumplist`: the navigation engine
//! - `picker`: grouped choice list for interactive selection
//! - `outcome`: what an operation did and the message to show for it

pub mod jumplist;
pub mod linked_list;
pub mod outcome;
pub mod picker;
pub mod point;
pub mod rebase;

pub use jumplist::{JumpList, MAX_LENGTH};
pub use outcome::{JumpOutcome, Message, MessageLevel};
pub use picker::{JumpPicker, PickerEntry, PickerGroup};
pub use point::{JumpPoint, Location, Position, Range};
pub use rebase::TextEdit;

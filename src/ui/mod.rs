//! Terminal interface for the jump picker.
//!
//! The picker renders with ratatui and reads keys through termion.

pub mod jump_picker;

pub use jump_picker::{render_jump_picker, run_interactive_picker};

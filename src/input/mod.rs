//! Script input for the command-line driver.
//!
//! `script` turns text lines into commands; `handler` runs them against a
//! jump list and an in-memory host.

pub mod handler;
pub mod script;

pub use handler::{ScriptError, ScriptRunner};
pub use script::{parse_line, ParseError, ScriptCommand};

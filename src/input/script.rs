//! Line-oriented script language for driving a jump list from text.
//!
//! One command per line; blank lines and lines starting with `#` are
//! skipped. Line and column numbers are 1-based as a user sees them.
//!
//! ```text
//! open src/main.rs
//! cursor 12 5
//! register
//! edit 3 4 first\nsecond\nthird
//! back
//! list
//! pick 0
//! ```

use std::path::PathBuf;

use thiserror::Error;

use crate::commands::Command;

/// One parsed script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    /// Load a file from disk and make it active
    Open(PathBuf),
    /// Create an in-memory document and make it active
    New { id: String, text: String },
    /// Move the cursor of the active document (1-based)
    Cursor { line: usize, column: usize },
    /// Run a jump list command
    Run(Command),
    /// Accept picker row `n` (0-based), or open the interactive picker
    Pick(Option<usize>),
    /// Replace lines `first..=last` (1-based) of the active document
    Edit {
        first: usize,
        last: usize,
        text: String,
    },
    /// Rename a document or directory
    Rename { old: String, new: String },
    /// Delete a document or directory
    Delete(String),
    /// Switch stack mode on or off
    Stack(bool),
}

/// Errors produced while parsing a script line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("'{command}' expects {expected}")]
    MissingArgument {
        command: String,
        expected: &'static str,
    },

    #[error("'{0}' is not a positive number")]
    InvalidNumber(String),
}

/// Parses one script line. Returns `Ok(None)` for blank and comment lines.
///
/// # Example
///
/// ```
/// use vim_jumplist::input::script::{parse_line, ScriptCommand};
///
/// assert_eq!(
///     parse_line("cursor 3 7").unwrap(),
///     Some(ScriptCommand::Cursor { line: 3, column: 7 })
/// );
/// assert_eq!(parse_line("# comment").unwrap(), None);
/// ```
pub fn parse_line(line: &str) -> Result<Option<ScriptCommand>, ParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let Some((word, rest)) = next_token(line) else {
        return Ok(None);
    };

    let command = match word {
        "open" => ScriptCommand::Open(PathBuf::from(required(word, rest.trim(), "a path")?)),
        "new" => {
            let (id, text) = next_token(rest).ok_or_else(|| missing(word, "a document name"))?;
            ScriptCommand::New {
                id: id.to_string(),
                text: unescape(text.trim_start()),
            }
        }
        "cursor" => {
            let (line, rest) = next_token(rest).ok_or_else(|| missing(word, "a line and a column"))?;
            let column = match next_token(rest) {
                Some((column, _)) => number(column)?,
                None => 1,
            };
            ScriptCommand::Cursor {
                line: number(line)?,
                column,
            }
        }
        "register" => ScriptCommand::Run(Command::RegisterJump),
        "back" => ScriptCommand::Run(Command::JumpBack),
        "forward" => ScriptCommand::Run(Command::JumpForward),
        "list" => ScriptCommand::Run(Command::Jump),
        "clear" => ScriptCommand::Run(Command::Clear),
        "pick" => match next_token(rest) {
            Some((row, _)) => ScriptCommand::Pick(Some(
                row.parse().map_err(|_| ParseError::InvalidNumber(row.to_string()))?,
            )),
            None => ScriptCommand::Pick(None),
        },
        "edit" => {
            let (first, rest) = next_token(rest).ok_or_else(|| missing(word, "a line range"))?;
            let (last, text) = next_token(rest).ok_or_else(|| missing(word, "a line range"))?;
            ScriptCommand::Edit {
                first: number(first)?,
                last: number(last)?,
                text: unescape(text.trim_start()),
            }
        }
        "rename" => {
            let (old, rest) = next_token(rest).ok_or_else(|| missing(word, "two names"))?;
            let (new, _) = next_token(rest).ok_or_else(|| missing(word, "two names"))?;
            ScriptCommand::Rename {
                old: old.to_string(),
                new: new.to_string(),
            }
        }
        "delete" => ScriptCommand::Delete(required(word, rest.trim(), "a name")?.to_string()),
        "stack" => match rest.trim() {
            "on" => ScriptCommand::Stack(true),
            "off" => ScriptCommand::Stack(false),
            _ => return Err(missing(word, "'on' or 'off'")),
        },
        other => match other.parse::<Command>() {
            Ok(command) => ScriptCommand::Run(command),
            Err(_) => return Err(ParseError::UnknownCommand(other.to_string())),
        },
    };

    Ok(Some(command))
}

/// Splits off the first whitespace-delimited token.
fn next_token(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }
    match input.find(char::is_whitespace) {
        Some(end) => Some((&input[..end], &input[end..])),
        None => Some((input, "")),
    }
}

fn required<'a>(command: &str, value: &'a str, expected: &'static str) -> Result<&'a str, ParseError> {
    if value.is_empty() {
        Err(missing(command, expected))
    } else {
        Ok(value)
    }
}

fn missing(command: &str, expected: &'static str) -> ParseError {
    ParseError::MissingArgument {
        command: command.to_string(),
        expected,
    }
}

/// Parses a 1-based number.
fn number(token: &str) -> Result<usize, ParseError> {
    match token.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ParseError::InvalidNumber(token.to_string())),
    }
}

/// Expands `\n`, `\t` and `\\`.
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

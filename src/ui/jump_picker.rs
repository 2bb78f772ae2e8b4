//! Interactive jump picker popup with live preview.

use std::io::Write;

use anyhow::{Context, Result};
use ratatui::backend::TermionBackend;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use termion::event::Key;
use termion::input::TermRead;
use termion::raw::IntoRawMode;
use termion::screen::IntoAlternateScreen;

use crate::history::picker::{JumpPicker, PickerGroup};

/// Renders the jump picker popup.
///
/// Displays a centered overlay with the older entries under a `Back` header
/// and the current and newer entries under `Current / Forward`:
/// - `>` cursor indicator and highlighted background on the selected entry
/// - the cached line text dimmed after each label
/// - a blank row for the live position
/// - footer with keyboard shortcuts
pub fn render_jump_picker(f: &mut Frame, picker: &JumpPicker) {
    let area = centered_rect(70, 70, f.area());

    f.render_widget(Clear, area);

    let block = Block::default()
        .title(" Jump List ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let mut lines = Vec::with_capacity(picker.len() + 5);
    let mut group = None;

    for (idx, entry) in picker.entries().iter().enumerate() {
        if group != Some(entry.group) {
            group = Some(entry.group);
            let header = match entry.group {
                PickerGroup::Before => "Back",
                PickerGroup::CurrentAndAfter => "Current / Forward",
            };
            lines.push(Line::from(Span::styled(
                header,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )));
        }

        let is_selected = idx == picker.selected_index();
        let cursor = if is_selected { "> " } else { "  " };
        let style = if is_selected {
            Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        lines.push(Line::from(vec![
            Span::styled(format!("{}{}", cursor, entry.label), style),
            Span::styled(
                format!("  {}", entry.detail),
                style.add_modifier(Modifier::DIM),
            ),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "↑/↓: Navigate  Enter: Jump  Esc: Cancel",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::ITALIC),
    )));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Left);

    f.render_widget(paragraph, area);
}

/// Runs the picker on the controlling terminal until the user accepts or cancels.
///
/// `on_highlight` is called for the initial selection and after every move,
/// so the caller can preview the highlighted location. Returns true if the
/// user accepted the highlighted entry.
pub fn run_interactive_picker<F>(picker: &mut JumpPicker, mut on_highlight: F) -> Result<bool>
where
    F: FnMut(&JumpPicker),
{
    let tty = termion::get_tty().context("Failed to open /dev/tty")?;
    let input = tty.try_clone().context("Failed to clone /dev/tty handle")?;
    let output = tty
        .into_raw_mode()
        .context("Failed to enable raw mode")?
        .into_alternate_screen()
        .context("Failed to enter alternate screen")?;

    let mut terminal = Terminal::new(TermionBackend::new(output))?;
    terminal.clear()?;

    on_highlight(picker);
    let result = picker_loop(&mut terminal, picker, &mut on_highlight, input.keys());

    write!(terminal.backend_mut(), "{}", termion::cursor::Show)?;
    terminal.backend_mut().flush()?;

    result
}

fn picker_loop<B, F, K>(
    terminal: &mut Terminal<B>,
    picker: &mut JumpPicker,
    on_highlight: &mut F,
    mut keys: K,
) -> Result<bool>
where
    B: ratatui::backend::Backend,
    F: FnMut(&JumpPicker),
    K: Iterator<Item = std::io::Result<Key>>,
{
    loop {
        terminal.draw(|f| render_jump_picker(f, picker))?;

        let Some(key) = keys.next() else {
            return Ok(false);
        };
        match key? {
            Key::Up | Key::Char('k') | Key::Ctrl('p') => {
                if picker.select_previous() {
                    on_highlight(picker);
                }
            }
            Key::Down | Key::Char('j') | Key::Ctrl('n') => {
                if picker.select_next() {
                    on_highlight(picker);
                }
            }
            Key::Char('\n') => return Ok(true),
            Key::Esc | Key::Char('q') | Key::Ctrl('c') => return Ok(false),
            _ => {}
        }
    }
}

/// Helper function to create a centered rectangle.
///
/// # Arguments
///
/// * `percent_x` - Percentage width (0-100)
/// * `percent_y` - Percentage height (0-100)
/// * `r` - The parent rectangle to center within
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

// ABOUTME: Upload field: a single-line path input built on tui-textarea.
// ABOUTME: Also turns typed or pasted text into a file path.

use std::path::PathBuf;
use tui_textarea::TextArea;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders};

use crate::theme::Theme;

/// Create the input with its placeholder text.
pub fn new_input() -> TextArea<'static> {
    let mut input = TextArea::default();
    input.set_placeholder_text("Path to an image (png, jpeg, gif, bmp, webp)");
    input.set_cursor_line_style(Style::default());
    input
}

/// Replace the input's contents.
pub fn set_text(input: &mut TextArea<'static>, text: &str) {
    input.select_all();
    input.cut();
    input.insert_str(text);
}

/// Style the input's block for the current focus.
pub fn style_input(input: &mut TextArea<'static>, focused: bool, theme: &Theme) {
    let border = if focused {
        theme.border_focused
    } else {
        theme.border
    };
    input.set_block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(" Image ")
            .title_style(Style::default().fg(theme.text_muted)),
    );
    input.set_style(Style::default().fg(theme.text));
    input.set_placeholder_style(Style::default().fg(theme.text_muted));
    input.set_cursor_style(if focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    });
}

/// Interpret user text as a path.
///
/// Surrounding whitespace and one pair of matching quotes are dropped, a
/// `file://` prefix (what terminals paste for dragged files) is removed, and
/// a leading `~` is expanded. Blank input yields `None`.
pub fn parse_path(text: &str) -> Option<PathBuf> {
    let mut text = text.trim();
    for quote in ['"', '\''] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            text = &text[1..text.len() - 1];
            break;
        }
    }
    let text = text.strip_prefix("file://").unwrap_or(text);
    if text.is_empty() {
        return None;
    }

    if text == "~" {
        return dirs::home_dir();
    }
    if let Some(rest) = text.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return Some(home.join(rest));
        }
    }
    Some(PathBuf::from(text))
}

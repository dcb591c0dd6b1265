// ABOUTME: Bottom status bar.
// ABOUTME: Shows branding, workflow phase, the latest message, and keybindings.

use prism_core::Phase;
use ratatui::prelude::*;

use crate::app::{Focus, Screen};
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

pub struct StatusInfo<'a> {
    pub screen: Screen,
    pub focus: Focus,
    pub phase: Phase,
    pub busy: bool,
    pub message: Option<(&'a str, Level)>,
}

pub struct StatusBar;

pub fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "no image",
        Phase::HasPreview => "preview",
        Phase::HasPalette => "palette",
    }
}

pub fn key_hints(screen: Screen, focus: Focus) -> &'static str {
    match (screen, focus) {
        (Screen::Welcome, _) => "Enter start · Esc quit",
        (Screen::Uploader, Focus::Upload) => "Enter load · ^E extract · Tab swatches · ^Q quit",
        (Screen::Uploader, Focus::Palette) => {
            "←→↑↓ select · Enter copy · 1-9 copy · e extract · Tab path · ^Q quit"
        }
    }
}

impl StatusBar {
    pub fn render(area: Rect, buf: &mut Buffer, theme: &Theme, info: &StatusInfo) {
        buf.set_style(area, Style::default().bg(theme.surface));

        let (icon, icon_color) = if info.busy {
            ("◎", theme.accent)
        } else {
            match info.phase {
                Phase::Idle => ("◇", theme.text_muted),
                Phase::HasPreview => ("◈", theme.warning),
                Phase::HasPalette => ("◆", theme.success),
            }
        };

        let mut spans = vec![
            Span::styled(" ⬢ ", Style::default().fg(theme.accent).bold()),
            Span::styled("PRISM", Style::default().fg(theme.text).bold()),
            Span::styled(" │ ", Style::default().fg(theme.text_muted)),
            Span::styled(icon, Style::default().fg(icon_color)),
            Span::styled(
                format!(" {}", phase_label(info.phase)),
                Style::default().fg(theme.text_muted),
            ),
        ];
        if let Some((text, level)) = info.message {
            let color = match level {
                Level::Info => theme.text,
                Level::Error => theme.error,
            };
            spans.push(Span::styled(" │ ", Style::default().fg(theme.text_muted)));
            spans.push(Span::styled(text.to_string(), Style::default().fg(color)));
        }
        let left = Line::from(spans);
        buf.set_line(area.x, area.y, &left, area.width);

        let hints = key_hints(info.screen, info.focus);
        let hints_width = hints.chars().count() as u16 + 1;
        let left_width = left.width() as u16;
        if left_width + hints_width < area.width {
            let x = area.x + area.width - hints_width;
            buf.set_string(x, area.y, hints, Style::default().fg(theme.text_muted));
        }
    }
}

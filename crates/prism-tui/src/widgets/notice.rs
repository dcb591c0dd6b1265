// ABOUTME: Blocking acknowledgment popup.
// ABOUTME: Shown after a copy; any key or click dismisses it.

use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use super::centered_fixed;
use crate::theme::Theme;

pub struct Notice<'a> {
    pub message: &'a str,
    pub theme: &'a Theme,
}

impl Widget for Notice<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = (self.message.chars().count() as u16 + 8).max(32);
        let popup = centered_fixed(width, 5, area);
        Clear.render(popup, buf);

        Paragraph::new(vec![
            Line::from(self.message).style(Style::default().fg(self.theme.text).bold()),
            Line::from(""),
            Line::from("Press any key").style(Style::default().fg(self.theme.text_muted)),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(self.theme.border_focused))
                .style(Style::default().bg(self.theme.surface)),
        )
        .render(popup, buf);
    }
}

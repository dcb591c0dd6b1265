// ABOUTME: Welcome screen shown before the uploader.
// ABOUTME: Title, tagline, and a Get Started button.

use ratatui::layout::Margin;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Clear};

use super::centered_fixed;
use crate::theme::Theme;

pub const TITLE: &str = "🎨 Magic Color Palette";
pub const TAGLINE: &str = "Upload an image to reveal its beautiful palette";
pub const BUTTON: &str = "  Get Started  ";

const PANEL_WIDTH: u16 = 60;
const PANEL_HEIGHT: u16 = 9;

/// Where the Get Started button lands inside `area`.
pub fn button_area(area: Rect) -> Rect {
    let inner = panel_area(area).inner(Margin::new(1, 1));
    let width = BUTTON.chars().count() as u16;
    Rect {
        x: inner.x + inner.width.saturating_sub(width) / 2,
        y: inner.y + inner.height.saturating_sub(2),
        width: width.min(inner.width),
        height: inner.height.min(1),
    }
}

fn panel_area(area: Rect) -> Rect {
    centered_fixed(PANEL_WIDTH, PANEL_HEIGHT, area)
}

pub struct Welcome<'a> {
    pub theme: &'a Theme,
}

impl Widget for Welcome<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let panel = panel_area(area);
        Clear.render(panel, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.theme.border))
            .style(Style::default().bg(self.theme.surface));
        let inner = block.inner(panel);
        block.render(panel, buf);

        let title = Line::from(TITLE)
            .style(Style::default().fg(self.theme.text).bold())
            .alignment(Alignment::Center);
        let tagline = Line::from(TAGLINE)
            .style(Style::default().fg(self.theme.text_muted))
            .alignment(Alignment::Center);

        if inner.height > 1 {
            title.render(Rect { height: 1, y: inner.y + 1, ..inner }, buf);
        }
        if inner.height > 3 {
            tagline.render(Rect { height: 1, y: inner.y + 3, ..inner }, buf);
        }

        let button = button_area(area);
        buf.set_string(
            button.x,
            button.y,
            BUTTON,
            Style::default()
                .fg(self.theme.text_inverse)
                .bg(self.theme.button)
                .bold(),
        );
    }
}

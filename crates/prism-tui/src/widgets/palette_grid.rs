// ABOUTME: Swatch grid for the extracted palette.
// ABOUTME: Three columns on wide cards, two on narrow ones, one swatch per code.

use prism_core::{HexCode, PaletteState};
use ratatui::layout::Margin;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::theme::Theme;

/// Below this inner width the grid drops to two columns.
const NARROW_WIDTH: u16 = 36;
pub const SWATCH_HEIGHT: u16 = 4;

pub fn columns_for(width: u16) -> usize {
    if width < NARROW_WIDTH {
        2
    } else {
        3
    }
}

/// Rows needed to show `count` swatches at `width`.
pub fn rows_for(count: usize, width: u16) -> usize {
    count.div_ceil(columns_for(width)).max(1)
}

/// Screen rects of the first `count` swatches, row-major.
pub fn swatch_areas(area: Rect, count: usize) -> Vec<Rect> {
    if count == 0 || area.is_empty() {
        return Vec::new();
    }
    let cols = columns_for(area.width);
    let rows = rows_for(count, area.width);

    let row_areas = Layout::vertical(vec![Constraint::Ratio(1, rows as u32); rows]).split(area);
    row_areas
        .iter()
        .flat_map(|row| {
            Layout::horizontal(vec![Constraint::Ratio(1, cols as u32); cols])
                .split(*row)
                .to_vec()
        })
        .map(|cell| cell.inner(Margin::new(1, 0)))
        .take(count)
        .collect()
}

/// Black or white, whichever reads better on `code`.
pub fn label_color(code: &HexCode) -> Color {
    let rgb = code.to_rgb();
    let luma = 0.299 * rgb.red as f32 + 0.587 * rgb.green as f32 + 0.114 * rgb.blue as f32;
    if luma > 150.0 {
        Color::Black
    } else {
        Color::White
    }
}

pub struct PaletteGrid<'a> {
    pub state: &'a PaletteState,
    pub extracting: bool,
    /// Highlighted swatch, when the grid has focus
    pub selected: Option<usize>,
    pub theme: &'a Theme,
}

impl PaletteGrid<'_> {
    /// Inner rect the swatches are laid out in.
    pub fn inner(area: Rect) -> Rect {
        Self::block_for(Color::Reset, Color::Reset).inner(area)
    }

    fn block_for(border: Color, title: Color) -> Block<'static> {
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(border))
            .title(" Extracted Palette ")
            .title_style(Style::default().fg(title).bold())
    }

    fn render_swatch(&self, index: usize, code: &HexCode, area: Rect, buf: &mut Buffer) {
        let rgb = code.to_rgb();
        let fill = Color::Rgb(rgb.red, rgb.green, rgb.blue);
        let label = label_color(code);
        buf.set_style(area, Style::default().bg(fill));

        let selected = self.selected == Some(index);
        let marker = if selected { "▸" } else { " " };
        let number = Line::from(format!("{marker}{}", index + 1)).style(
            Style::default()
                .fg(label)
                .add_modifier(if selected {
                    Modifier::BOLD | Modifier::UNDERLINED
                } else {
                    Modifier::empty()
                }),
        );
        buf.set_line(area.x, area.y, &number, area.width);

        if area.height > 1 {
            let text = Line::from(code.as_str()).style(Style::default().fg(label).bold());
            let x = area.x + area.width.saturating_sub(text.width() as u16) / 2;
            buf.set_line(x, area.y + area.height - 1, &text, area.width);
        }
    }
}

impl Widget for PaletteGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Self::block_for(self.theme.border, self.theme.text);
        let inner = block.inner(area);
        block.render(area, buf);

        let message = match self.state {
            _ if self.extracting => Some(("Extracting colors…".to_string(), self.theme.accent)),
            PaletteState::Empty => None,
            PaletteState::Failed(e) => Some((format!("Extraction failed: {}", e), self.theme.error)),
            PaletteState::Ready(_) => None,
        };
        if let Some((text, color)) = message {
            Paragraph::new(text)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .style(Style::default().fg(color))
                .render(inner, buf);
            return;
        }

        if let PaletteState::Ready(palette) = self.state {
            for (index, (code, cell)) in palette
                .iter()
                .zip(swatch_areas(inner, palette.len()))
                .enumerate()
            {
                self.render_swatch(index, code, cell, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::DEFAULT_THEME;
    use prism_core::{ExtractionError, Palette};

    fn palette(codes: &[&str]) -> Palette {
        Palette::new(codes.iter().map(|c| c.parse().unwrap()).collect())
    }

    fn text(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_six_swatches_in_three_columns() {
        let areas = swatch_areas(Rect::new(0, 0, 60, 8), 6);
        assert_eq!(areas.len(), 6);
        // Two rows of three
        assert_eq!(areas[0].y, areas[2].y);
        assert!(areas[3].y > areas[0].y);
        assert!(areas[1].x > areas[0].x);
        for (a, b) in areas.iter().zip(areas.iter().skip(1)) {
            assert!(!a.intersects(*b));
        }
    }

    #[test]
    fn test_narrow_grid_uses_two_columns() {
        assert_eq!(columns_for(20), 2);
        assert_eq!(rows_for(6, 20), 3);
        let areas = swatch_areas(Rect::new(0, 0, 20, 12), 6);
        assert_eq!(areas[0].y, areas[1].y);
        assert!(areas[2].y > areas[1].y);
    }

    #[test]
    fn test_no_swatches_for_empty_area() {
        assert!(swatch_areas(Rect::new(0, 0, 0, 0), 6).is_empty());
        assert!(swatch_areas(Rect::new(0, 0, 40, 8), 0).is_empty());
    }

    #[test]
    fn test_label_color_contrasts() {
        assert_eq!(label_color(&"#ffffff".parse().unwrap()), Color::Black);
        assert_eq!(label_color(&"#000000".parse().unwrap()), Color::White);
        assert_eq!(label_color(&"#1e3a8a".parse().unwrap()), Color::White);
    }

    #[test]
    fn test_renders_codes_and_fills() {
        let state = PaletteState::Ready(palette(&[
            "#ff0000", "#00ff00", "#0000ff", "#ffff00", "#00ffff", "#ff00ff",
        ]));
        let area = Rect::new(0, 0, 60, 9);
        let mut buf = Buffer::empty(area);
        PaletteGrid {
            state: &state,
            extracting: false,
            selected: Some(0),
            theme: &DEFAULT_THEME,
        }
        .render(area, &mut buf);

        let rendered = text(&buf);
        for code in ["#ff0000", "#00ff00", "#0000ff", "#ffff00", "#00ffff", "#ff00ff"] {
            assert!(rendered.contains(code), "missing {code}");
        }
        assert!(buf
            .content()
            .iter()
            .any(|c| c.bg == Color::Rgb(0, 0, 255)));
    }

    #[test]
    fn test_failed_state_shows_error() {
        let state = PaletteState::Failed(ExtractionError::NoOpaquePixels);
        let area = Rect::new(0, 0, 60, 6);
        let mut buf = Buffer::empty(area);
        PaletteGrid {
            state: &state,
            extracting: false,
            selected: None,
            theme: &DEFAULT_THEME,
        }
        .render(area, &mut buf);
        assert!(text(&buf).contains("Extraction failed"));
    }
}

// ABOUTME: Half-block image preview.
// ABOUTME: Two pixels per cell: the upper one as foreground, the lower as background.

use image::imageops::{self, FilterType};
use image::RgbaImage;
use prism_core::Surface;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::theme::Theme;

const UPPER_HALF: &str = "▀";

/// Largest thumbnail kept in memory for drawing.
const THUMBNAIL_MAX: u32 = 256;

/// Shrink a decoded surface to something cheap to redraw every tick.
pub fn thumbnail(surface: &Surface) -> RgbaImage {
    let (w, h) = surface.dimensions();
    if w <= THUMBNAIL_MAX && h <= THUMBNAIL_MAX {
        return surface.clone();
    }
    let (tw, th) = fit((w, h), (THUMBNAIL_MAX, THUMBNAIL_MAX));
    imageops::resize(surface, tw, th, FilterType::Triangle)
}

/// Largest size with the aspect ratio of `image` that fits in `bounds`.
pub fn fit(image: (u32, u32), bounds: (u32, u32)) -> (u32, u32) {
    let (iw, ih) = image;
    let (bw, bh) = bounds;
    if iw == 0 || ih == 0 || bw == 0 || bh == 0 {
        return (0, 0);
    }
    let scale = f64::min(bw as f64 / iw as f64, bh as f64 / ih as f64);
    let w = ((iw as f64 * scale).round() as u32).clamp(1, bw);
    let h = ((ih as f64 * scale).round() as u32).clamp(1, bh);
    (w, h)
}

pub struct ImageView<'a> {
    pub image: Option<&'a RgbaImage>,
    pub loading: bool,
    /// A preview is loaded even if `image` is missing (it failed to decode).
    pub has_preview: bool,
    pub theme: &'a Theme,
}

impl ImageView<'_> {
    fn pixel(&self, image: &RgbaImage, x: u32, y: u32) -> Color {
        let [r, g, b, a] = image.get_pixel(x, y).0;
        let Color::Rgb(sr, sg, sb) = self.theme.surface else {
            return Color::Rgb(r, g, b);
        };
        let alpha = a as u16;
        let mix = |c: u8, s: u8| ((c as u16 * alpha + s as u16 * (255 - alpha)) / 255) as u8;
        Color::Rgb(mix(r, sr), mix(g, sg), mix(b, sb))
    }
}

impl Widget for ImageView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border));
        let inner = block.inner(area);
        block.render(area, buf);

        let Some(image) = self.image else {
            let hint = if self.loading {
                "Reading image…"
            } else if self.has_preview {
                "Preview unavailable"
            } else {
                "No image yet. Type a path above and press Enter."
            };
            Paragraph::new(hint)
                .alignment(Alignment::Center)
                .style(Style::default().fg(self.theme.text_muted))
                .render(centered_line(inner), buf);
            return;
        };

        let (w, h) = fit(
            image.dimensions(),
            (inner.width as u32, inner.height as u32 * 2),
        );
        if w == 0 || h == 0 {
            return;
        }
        let cols = w as u16;
        let rows = h.div_ceil(2) as u16;
        let x0 = inner.x + (inner.width - cols) / 2;
        let y0 = inner.y + (inner.height - rows) / 2;
        let (iw, ih) = image.dimensions();

        for row in 0..rows {
            for col in 0..cols {
                let sx = (col as u32 * iw / w).min(iw - 1);
                let top_y = row as u32 * 2;
                let upper = self.pixel(image, sx, (top_y * ih / h).min(ih - 1));
                let lower = if top_y + 1 < h {
                    self.pixel(image, sx, ((top_y + 1) * ih / h).min(ih - 1))
                } else {
                    self.theme.surface
                };
                if let Some(cell) = buf.cell_mut((x0 + col, y0 + row)) {
                    cell.set_symbol(UPPER_HALF).set_fg(upper).set_bg(lower);
                }
            }
        }
    }
}

fn centered_line(area: Rect) -> Rect {
    Rect {
        y: area.y + area.height / 2,
        height: area.height.min(1),
        ..area
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::DEFAULT_THEME;
    use image::Rgba;

    #[test]
    fn test_fit_keeps_aspect() {
        assert_eq!(fit((200, 100), (50, 50)), (50, 25));
        assert_eq!(fit((100, 200), (50, 50)), (25, 50));
        assert_eq!(fit((2, 2), (40, 20)), (20, 20));
        assert_eq!(fit((0, 10), (40, 20)), (0, 0));
    }

    #[test]
    fn test_thumbnail_shrinks_large_images() {
        let big = RgbaImage::from_pixel(1024, 512, Rgba([1, 2, 3, 255]));
        assert_eq!(thumbnail(&big).dimensions(), (256, 128));

        let small = RgbaImage::from_pixel(16, 8, Rgba([1, 2, 3, 255]));
        assert_eq!(thumbnail(&small).dimensions(), (16, 8));
    }

    #[test]
    fn test_solid_image_fills_cells() {
        let image = RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255]));
        let area = Rect::new(0, 0, 12, 8);
        let mut buf = Buffer::empty(area);
        ImageView {
            image: Some(&image),
            loading: false,
            has_preview: true,
            theme: &DEFAULT_THEME,
        }
        .render(area, &mut buf);

        let red_cells = buf
            .content()
            .iter()
            .filter(|c| c.symbol() == UPPER_HALF && c.fg == Color::Rgb(255, 0, 0))
            .count();
        assert!(red_cells > 0);
    }

    #[test]
    fn test_empty_view_shows_hint() {
        let area = Rect::new(0, 0, 60, 5);
        let mut buf = Buffer::empty(area);
        ImageView {
            image: None,
            loading: false,
            has_preview: false,
            theme: &DEFAULT_THEME,
        }
        .render(area, &mut buf);

        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("No image yet"));
    }

    #[test]
    fn test_undecodable_preview_says_unavailable() {
        let area = Rect::new(0, 0, 60, 5);
        let mut buf = Buffer::empty(area);
        ImageView {
            image: None,
            loading: false,
            has_preview: true,
            theme: &DEFAULT_THEME,
        }
        .render(area, &mut buf);

        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Preview unavailable"));
        assert!(!text.contains("No image yet"));
    }
}

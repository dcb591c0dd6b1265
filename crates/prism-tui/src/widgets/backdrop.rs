// ABOUTME: Decorative circle backdrop drawn on a braille canvas.
// ABOUTME: Each circle fades toward the page background as it blinks.

use prism_core::circles::BASE_OPACITY;
use prism_core::{DecorativeCircle, Rgb};
use ratatui::prelude::*;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Circle};

use crate::theme::Theme;

/// Canvas units per pixel of circle diameter.
const SIZE_SCALE: f64 = 1.0 / 12.0;
/// Spacing between the concentric rings that fill a circle.
const RING_STEP: f64 = 0.6;

pub struct Backdrop<'a> {
    pub circles: &'a [DecorativeCircle],
    /// Seconds since the session started, or `None` to hold still
    pub elapsed: Option<f32>,
    pub theme: &'a Theme,
}

impl Widget for Backdrop<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let background = self.theme.background;
        let circles: Vec<(f64, f64, f64, Color)> = self
            .circles
            .iter()
            .map(|c| {
                let opacity = self.elapsed.map_or(BASE_OPACITY, |t| c.opacity_at(t));
                let radius = c.size as f64 * SIZE_SCALE;
                (
                    c.left as f64 + radius,
                    100.0 - c.top as f64 - radius,
                    radius,
                    blend(c.color(), background, opacity),
                )
            })
            .collect();

        Canvas::default()
            .background_color(background)
            .marker(Marker::Braille)
            .x_bounds([0.0, 100.0])
            .y_bounds([0.0, 100.0])
            .paint(|ctx| {
                for &(x, y, radius, color) in &circles {
                    let mut r = radius;
                    while r > 0.0 {
                        ctx.draw(&Circle {
                            x,
                            y,
                            radius: r,
                            color,
                        });
                        r -= RING_STEP;
                    }
                }
            })
            .render(area, buf);
    }
}

/// Mix `fg` over `bg` at `opacity`. Non-RGB backgrounds count as black.
pub fn blend(fg: Rgb, bg: Color, opacity: f32) -> Color {
    let (br, bgc, bb) = match bg {
        Color::Rgb(r, g, b) => (r, g, b),
        _ => (0, 0, 0),
    };
    let opacity = opacity.clamp(0.0, 1.0);
    let mix = |f: u8, b: u8| (b as f32 + (f as f32 - b as f32) * opacity).round() as u8;
    Color::Rgb(mix(fg.red, br), mix(fg.green, bgc), mix(fg.blue, bb))
}

// ABOUTME: Widget module exports.
// ABOUTME: Backdrop, preview, palette grid, upload field, status bar, and overlays.

pub mod backdrop;
pub mod image_view;
pub mod notice;
pub mod palette_grid;
pub mod status_bar;
pub mod upload;
pub mod welcome;

use ratatui::prelude::*;

/// A `width` × `height` rect centered in `r`, clamped to fit.
pub fn centered_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect {
        x: r.x + (r.width - width) / 2,
        y: r.y + (r.height - height) / 2,
        width,
        height,
    }
}

// ABOUTME: Extract command implementation.
// ABOUTME: Prints an image's palette as colored swatches or JSON.

use crossterm::style::{Color, ResetColor, SetForegroundColor};
use prism_core::{ExtractionError, ImagePreview, Palette, PaletteExtractor};
use std::io::{self, IsTerminal, Write};
use std::path::Path;

use crate::error::Result;
use crate::state::config::Config;

pub struct ExtractOptions<'a> {
    pub image: &'a Path,
    pub count: Option<usize>,
    pub quality: Option<usize>,
    pub json: bool,
}

pub async fn run(config: &Config, options: ExtractOptions<'_>) -> Result<()> {
    let mut settings = config.palette.clone();
    if let Some(count) = options.count {
        settings.size = count;
    }
    if let Some(quality) = options.quality {
        settings.quality = quality;
    }

    let preview = ImagePreview::read(options.image).await?;
    let extractor = PaletteExtractor::from_config(&settings);
    tracing::info!(
        path = %options.image.display(),
        count = extractor.count(),
        "Extracting palette"
    );

    let palette = tokio::task::spawn_blocking(move || extractor.extract(&preview))
        .await
        .map_err(|e| ExtractionError::Quantizer(format!("extraction task failed: {}", e)))??;

    let mut stdout = io::stdout().lock();
    if options.json {
        writeln!(stdout, "{}", serde_json::to_string_pretty(&palette)?)?;
    } else {
        let color = io::stdout().is_terminal();
        write_swatches(&mut stdout, &palette, color)?;
    }
    Ok(())
}

/// One line per code, led by a colored block when `color` is set.
pub fn write_swatches(out: &mut impl Write, palette: &Palette, color: bool) -> io::Result<()> {
    for (index, code) in palette.iter().enumerate() {
        if color {
            let rgb = code.to_rgb();
            write!(
                out,
                "{}██████{} ",
                SetForegroundColor(Color::Rgb {
                    r: rgb.red,
                    g: rgb.green,
                    b: rgb.blue
                }),
                ResetColor
            )?;
        }
        writeln!(out, "{}. {}", index + 1, code)?;
    }
    Ok(())
}

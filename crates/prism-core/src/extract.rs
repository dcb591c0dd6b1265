// ABOUTME: Palette extractor adapter
// ABOUTME: Renders a preview, asks the quantizer for colors, and returns fixed-size hex palettes

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::color::{HexCode, Rgb};
use crate::config::ExtractorConfig;
use crate::error::ExtractionError;
use crate::preview::{ImagePreview, Surface};
use crate::quantize::{KMeansQuantizer, Quantizer};

/// Number of swatches produced per extraction.
pub const PALETTE_SIZE: usize = 6;

/// Ordered color codes, most representative first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    codes: Vec<HexCode>,
}

impl Palette {
    pub fn new(codes: Vec<HexCode>) -> Self {
        Self { codes }
    }

    pub fn codes(&self) -> &[HexCode] {
        &self.codes
    }

    pub fn get(&self, index: usize) -> Option<&HexCode> {
        self.codes.get(index)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HexCode> {
        self.codes.iter()
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a HexCode;
    type IntoIter = std::slice::Iter<'a, HexCode>;

    fn into_iter(self) -> Self::IntoIter {
        self.codes.iter()
    }
}

/// Turns previews into palettes through a [`Quantizer`].
#[derive(Clone)]
pub struct PaletteExtractor {
    quantizer: Arc<dyn Quantizer>,
    count: usize,
}

impl Default for PaletteExtractor {
    fn default() -> Self {
        Self::new(Arc::new(KMeansQuantizer::default()), PALETTE_SIZE)
    }
}

impl std::fmt::Debug for PaletteExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaletteExtractor")
            .field("count", &self.count)
            .finish_non_exhaustive()
    }
}

impl PaletteExtractor {
    pub fn new(quantizer: Arc<dyn Quantizer>, count: usize) -> Self {
        Self { quantizer, count }
    }

    /// Build the default k-means extractor from configuration.
    pub fn from_config(config: &ExtractorConfig) -> Self {
        let quantizer = KMeansQuantizer::new(config.quality, config.seed);
        Self::new(Arc::new(quantizer), config.size)
    }

    /// Number of codes every palette will contain.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Decode the preview and extract its palette.
    pub fn extract(&self, preview: &ImagePreview) -> Result<Palette, ExtractionError> {
        let surface = preview.render()?;
        self.extract_surface(&surface)
    }

    /// Extract a palette from an already decoded surface.
    pub fn extract_surface(&self, surface: &Surface) -> Result<Palette, ExtractionError> {
        if self.count == 0 || self.count > u8::MAX as usize {
            return Err(ExtractionError::InvalidCount(self.count));
        }

        let colors = self.quantizer.quantize(surface, self.count)?;
        let colors = fill_to_count(colors, self.count)?;

        let palette = Palette::new(colors.into_iter().map(HexCode::from_rgb).collect());
        tracing::debug!(
            width = surface.width(),
            height = surface.height(),
            codes = ?palette.codes(),
            "Extracted palette"
        );
        Ok(palette)
    }
}

/// Cycle or truncate so exactly `count` colors remain.
fn fill_to_count(colors: Vec<Rgb>, count: usize) -> Result<Vec<Rgb>, ExtractionError> {
    if colors.is_empty() {
        return Err(ExtractionError::Quantizer("returned no colors".into()));
    }
    Ok(colors.iter().copied().cycle().take(count).collect())
}

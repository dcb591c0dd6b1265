// ABOUTME: Quantizer seam between the palette adapter and the clustering library
// ABOUTME: Default implementation runs k-means in CIE Lab via kmeans_colors

use kmeans_colors::get_kmeans;
use palette::{FromColor, Lab, Srgb};
use std::collections::HashMap;

use crate::color::Rgb;
use crate::error::ExtractionError;
use crate::preview::Surface;

/// Pixels with alpha below this are skipped.
pub const MIN_ALPHA: u8 = 125;

/// Reduces a pixel surface to a small set of representative colors.
///
/// Implementations return up to `count` colors ranked most representative
/// first. Returning fewer is allowed; the adapter pads the result.
pub trait Quantizer: Send + Sync {
    fn quantize(&self, surface: &Surface, count: usize) -> Result<Vec<Rgb>, ExtractionError>;
}

/// k-means clustering in Lab space with a fixed seed.
#[derive(Debug, Clone)]
pub struct KMeansQuantizer {
    /// Sample every `quality`-th pixel (1 = every pixel).
    pub quality: usize,
    pub max_iter: usize,
    pub converge: f32,
    pub seed: u64,
}

impl Default for KMeansQuantizer {
    fn default() -> Self {
        Self {
            quality: 10,
            max_iter: 20,
            converge: 1e-4,
            seed: 0,
        }
    }
}

impl KMeansQuantizer {
    pub fn new(quality: usize, seed: u64) -> Self {
        Self {
            quality: quality.clamp(1, 10),
            seed,
            ..Self::default()
        }
    }
}

/// Collect the opaque pixels visited by the sampling stride.
pub fn sample_pixels(surface: &Surface, quality: usize) -> Vec<Rgb> {
    surface
        .pixels()
        .step_by(quality.max(1))
        .filter(|p| p.0[3] >= MIN_ALPHA)
        .map(|p| Rgb::new(p.0[0], p.0[1], p.0[2]))
        .collect()
}

/// Distinct colors ranked by population (ties broken by first appearance).
fn ranked_distinct(pixels: &[Rgb], limit: usize) -> Option<Vec<Rgb>> {
    let mut counts: HashMap<(u8, u8, u8), (usize, usize)> = HashMap::new();
    for (order, p) in pixels.iter().enumerate() {
        let entry = counts
            .entry((p.red, p.green, p.blue))
            .or_insert((0, order));
        entry.0 += 1;
        if counts.len() > limit {
            return None;
        }
    }

    let mut ranked: Vec<_> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));
    Some(
        ranked
            .into_iter()
            .map(|((r, g, b), _)| Rgb::new(r, g, b))
            .collect(),
    )
}

impl Quantizer for KMeansQuantizer {
    fn quantize(&self, surface: &Surface, count: usize) -> Result<Vec<Rgb>, ExtractionError> {
        if count == 0 || count > u8::MAX as usize {
            return Err(ExtractionError::InvalidCount(count));
        }

        let pixels = sample_pixels(surface, self.quality);
        if pixels.is_empty() {
            return Err(ExtractionError::NoOpaquePixels);
        }

        // k-means cannot split fewer distinct points than clusters.
        if let Some(distinct) = ranked_distinct(&pixels, count) {
            tracing::debug!(colors = distinct.len(), "Image has few colors, skipping k-means");
            return Ok(distinct);
        }

        let lab: Vec<Lab> = pixels
            .iter()
            .map(|p| Lab::from_color(p.into_format::<f32>()))
            .collect();
        let result = get_kmeans(count, self.max_iter, self.converge, false, &lab, self.seed);

        let mut population = vec![0usize; result.centroids.len()];
        for &idx in &result.indices {
            if let Some(slot) = population.get_mut(idx as usize) {
                *slot += 1;
            }
        }

        let mut order: Vec<usize> = (0..result.centroids.len()).collect();
        order.sort_by(|&a, &b| population[b].cmp(&population[a]).then(a.cmp(&b)));

        tracing::debug!(
            samples = lab.len(),
            score = result.score,
            "k-means converged"
        );

        Ok(order
            .into_iter()
            .map(|i| Srgb::<f32>::from_color(result.centroids[i]).into_format::<u8>())
            .collect())
    }
}

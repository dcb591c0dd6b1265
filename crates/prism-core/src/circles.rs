// ABOUTME: Decorative background circles
// ABOUTME: Generated once per session with random position, size, hue, and blink timing

use palette::{FromColor, Hsl, Srgb};
use rand::Rng;

use crate::color::Rgb;

/// Circles drawn behind the panels by default.
pub const DEFAULT_CIRCLE_COUNT: usize = 40;

const SATURATION: f32 = 0.7;
const LIGHTNESS: f32 = 0.6;

/// Resting opacity; blinking dips below it.
pub const BASE_OPACITY: f32 = 0.7;
const MIN_OPACITY: f32 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct DecorativeCircle {
    pub id: usize,
    /// Degrees, [0, 360)
    pub hue: f32,
    /// Percent of the height, [0, 100)
    pub top: f32,
    /// Percent of the width, [0, 90)
    pub left: f32,
    /// [30, 100)
    pub size: f32,
    /// Seconds before blinking starts, [0, 5)
    pub delay: f32,
    /// Seconds per blink cycle, [4, 10)
    pub duration: f32,
}

impl DecorativeCircle {
    pub fn random<R: Rng + ?Sized>(id: usize, rng: &mut R) -> Self {
        Self {
            id,
            hue: rng.gen_range(0.0..360.0f32).floor(),
            top: rng.gen_range(0.0..100.0),
            left: rng.gen_range(0.0..90.0),
            size: rng.gen_range(30.0..100.0),
            delay: rng.gen_range(0.0..5.0),
            duration: rng.gen_range(4.0..10.0),
        }
    }

    /// `hsl(hue, 70%, 60%)` as 8-bit sRGB.
    pub fn color(&self) -> Rgb {
        let hsl: Hsl = Hsl::new(self.hue, SATURATION, LIGHTNESS);
        Srgb::<f32>::from_color(hsl).into_format::<u8>()
    }

    /// Opacity at `elapsed` seconds since the session started.
    ///
    /// Holds [`BASE_OPACITY`] until `delay`, then dips linearly to the
    /// minimum at half a cycle and back.
    pub fn opacity_at(&self, elapsed: f32) -> f32 {
        if elapsed < self.delay {
            return BASE_OPACITY;
        }
        let phase = ((elapsed - self.delay) % self.duration) / self.duration;
        let dip = 1.0 - (2.0 * phase - 1.0).abs();
        BASE_OPACITY - (BASE_OPACITY - MIN_OPACITY) * dip
    }
}

/// Generate a session's worth of circles.
pub fn generate<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<DecorativeCircle> {
    (0..count).map(|id| DecorativeCircle::random(id, &mut *rng)).collect()
}

/// Generate circles with the thread-local RNG.
pub fn generate_session(count: usize) -> Vec<DecorativeCircle> {
    generate(count, &mut rand::thread_rng())
}

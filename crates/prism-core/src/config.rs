// ABOUTME: Serializable extraction settings shared by the CLI and the TUI.
// ABOUTME: Mirrors the [palette] section of the prism config file.

use serde::{Deserialize, Serialize};

use crate::extract::PALETTE_SIZE;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Number of swatches per palette
    #[serde(default = "default_size")]
    pub size: usize,

    /// Sampling stride, 1 (every pixel) to 10
    #[serde(default = "default_quality")]
    pub quality: usize,

    /// Seed for the k-means initialisation
    #[serde(default)]
    pub seed: u64,
}

fn default_size() -> usize {
    PALETTE_SIZE
}

fn default_quality() -> usize {
    10
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            quality: default_quality(),
            seed: 0,
        }
    }
}

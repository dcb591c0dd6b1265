// ABOUTME: Configuration file handling.
// ABOUTME: TOML config with env var and .env support.

use crate::error::{AppError, Result};
use prism_core::circles::DEFAULT_CIRCLE_COUNT;
use prism_core::ExtractorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub palette: ExtractorConfig,

    #[serde(default)]
    pub appearance: AppearanceConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AppearanceConfig {
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Decorative circles behind the panels; 0 disables them
    #[serde(default = "default_circles")]
    pub circles: usize,

    #[serde(default = "default_animate")]
    pub animate: bool,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            circles: default_circles(),
            animate: default_animate(),
        }
    }
}

fn default_theme() -> String {
    "default".to_string()
}

fn default_circles() -> usize {
    DEFAULT_CIRCLE_COUNT
}

fn default_animate() -> bool {
    true
}

impl Config {
    /// Load config with precedence: CLI > env > .env > file > defaults
    pub fn load(theme_override: Option<&str>, no_circles: bool) -> Result<Self> {
        // Load .env file if present (silently ignore if missing)
        let _ = dotenvy::dotenv();

        let mut config = match Self::config_path() {
            Ok(path) => Self::load_from_path(&path).unwrap_or_else(|e| {
                tracing::warn!("{}, using defaults", e);
                Self::default()
            }),
            Err(_) => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok());

        if let Some(theme) = theme_override {
            config.appearance.theme = theme.to_string();
        }
        if no_circles {
            config.appearance.circles = 0;
        }

        Ok(config)
    }

    /// Apply `PRISM_*` overrides. Unparseable numbers are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(theme) = lookup("PRISM_THEME") {
            self.appearance.theme = theme;
        }
        if let Some(size) = lookup("PRISM_PALETTE_SIZE").and_then(|v| v.parse().ok()) {
            self.palette.size = size;
        }
        if let Some(quality) = lookup("PRISM_QUALITY").and_then(|v| v.parse().ok()) {
            self.palette.quality = quality;
        }
        if let Some(circles) = lookup("PRISM_CIRCLES").and_then(|v| v.parse().ok()) {
            self.appearance.circles = circles;
        }
    }

    /// Read a config file. A missing file yields the defaults.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AppError::Config(format!("Failed to create config dir: {}", e)))?;
        }

        std::fs::write(path, self.to_toml()?)
            .map_err(|e| AppError::Config(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| AppError::Config(format!("Failed to serialize config: {}", e)))
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AppError::Config("Could not find config directory".to_string()))?;
        Ok(config_dir.join("prism").join("config.toml"))
    }
}

// ABOUTME: Application-wide error types.
// ABOUTME: Uses thiserror for ergonomic error handling.

use prism_core::{ExtractionError, ReadError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("Could not read image: {0}")]
    Read(#[from] ReadError),

    #[error("Could not extract palette: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Output error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown theme: {name}\n\nAvailable themes:\n{available}")]
    UnknownTheme { name: String, available: String },
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error_display() {
        let err: AppError = ReadError::UnsupportedFormat.into();
        assert!(err.to_string().starts_with("Could not read image"));
    }

    #[test]
    fn test_extraction_error_display() {
        let err: AppError = ExtractionError::NoOpaquePixels.into();
        assert!(err.to_string().contains("Could not extract palette"));
    }

    #[test]
    fn test_unknown_theme_lists_available() {
        let err = AppError::UnknownTheme {
            name: "neon".to_string(),
            available: "  default\n  light".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("neon"));
        assert!(msg.contains("  light"));
    }
}

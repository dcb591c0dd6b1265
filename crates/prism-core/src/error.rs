// ABOUTME: Error types for prism-core
// ABOUTME: ReadError for uploads, ExtractionError for palettes, ClipboardError for copies

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while turning a selected file into an image preview.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("file is empty")]
    Empty,

    #[error("file is not a supported image")]
    UnsupportedFormat,

    #[error("invalid data URI: {0}")]
    InvalidDataUri(String),

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Errors raised while extracting a palette from a preview.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("no image to extract colors from")]
    NoPreview,

    #[error("could not decode image: {0}")]
    Decode(String),

    #[error("image has no opaque pixels")]
    NoOpaquePixels,

    #[error("palette size must be between 1 and 255, got {0}")]
    InvalidCount(usize),

    #[error("quantizer failed: {0}")]
    Quantizer(String),
}

impl From<image::ImageError> for ExtractionError {
    fn from(err: image::ImageError) -> Self {
        ExtractionError::Decode(err.to_string())
    }
}

impl From<ReadError> for ExtractionError {
    fn from(err: ReadError) -> Self {
        ExtractionError::Decode(err.to_string())
    }
}

/// Errors raised while placing a color code on the clipboard.
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("no swatch at position {0}")]
    NoSwatch(usize),

    #[error("clipboard write failed: {0}")]
    Write(String),
}

impl From<arboard::Error> for ClipboardError {
    fn from(err: arboard::Error) -> Self {
        ClipboardError::Write(err.to_string())
    }
}

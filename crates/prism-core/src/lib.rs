// ABOUTME: prism-core - image preview and palette extraction
// ABOUTME: Data model, extractor adapter, session state machine, and decorative circles

pub mod circles;
pub mod clipboard;
pub mod color;
pub mod config;
pub mod error;
pub mod extract;
pub mod preview;
pub mod quantize;
pub mod session;

pub use circles::DecorativeCircle;
pub use clipboard::{Clipboard, MemoryClipboard, SystemClipboard};
pub use color::{HexCode, ParseHexError, Rgb};
pub use config::ExtractorConfig;
pub use error::{ClipboardError, ExtractionError, ReadError};
pub use extract::{Palette, PaletteExtractor, PALETTE_SIZE};
pub use preview::{ImagePreview, Surface};
pub use quantize::{KMeansQuantizer, Quantizer};
pub use session::{
    Completion, ExtractionJob, ExtractionTicket, PaletteState, Phase, Session, UploadRequest,
    UploadTicket,
};

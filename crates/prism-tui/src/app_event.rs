// ABOUTME: Defines the AppEvent enum for inter-component communication.
// ABOUTME: Background reads and extractions report back through these events.

use image::RgbaImage;
use prism_core::{
    ExtractionError, ExtractionTicket, ImagePreview, Palette, ReadError, UploadTicket,
};

/// A read preview plus the thumbnail the preview pane draws.
#[derive(Debug)]
pub struct LoadedImage {
    pub preview: ImagePreview,
    /// `None` when the bytes sniffed as an image but failed to decode
    pub thumbnail: Option<RgbaImage>,
}

#[derive(Debug)]
pub enum AppEvent {
    UploadFinished {
        ticket: UploadTicket,
        result: Result<LoadedImage, ReadError>,
    },
    ExtractionFinished {
        ticket: ExtractionTicket,
        result: Result<Palette, ExtractionError>,
    },
}

// ABOUTME: View state for the upload → preview → palette workflow
// ABOUTME: Tickets decide which asynchronous completions may still change state

use std::path::PathBuf;

use crate::clipboard::Clipboard;
use crate::color::HexCode;
use crate::error::{ClipboardError, ExtractionError, ReadError};
use crate::extract::Palette;
use crate::preview::ImagePreview;

/// Coarse UI phase derived from the session contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    HasPreview,
    HasPalette,
}

/// What the palette pane should show.
#[derive(Debug, Default)]
pub enum PaletteState {
    #[default]
    Empty,
    Ready(Palette),
    Failed(ExtractionError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTicket {
    seq: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionTicket {
    generation: u64,
    seq: u64,
}

impl ExtractionTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// A file read the caller must perform, then report with
/// [`Session::complete_upload`].
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub ticket: UploadTicket,
    pub path: PathBuf,
}

/// An extraction the caller must run, then report with
/// [`Session::complete_extraction`].
#[derive(Debug, Clone)]
pub struct ExtractionJob {
    pub ticket: ExtractionTicket,
    pub preview: ImagePreview,
}

/// Whether a completion changed the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Stale,
}

#[derive(Debug, Default)]
pub struct Session {
    preview: Option<ImagePreview>,
    palette: PaletteState,
    read_error: Option<ReadError>,
    /// Bumped every time a new preview is installed.
    generation: u64,
    latest_upload: u64,
    upload_pending: bool,
    latest_extraction: u64,
    extractions_in_flight: usize,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a file-selection event. Only the first file is used; an empty
    /// selection changes nothing.
    pub fn select_files(&mut self, files: &[PathBuf]) -> Option<UploadRequest> {
        let path = files.first()?.clone();
        self.latest_upload += 1;
        self.upload_pending = true;
        tracing::debug!(path = %path.display(), seq = self.latest_upload, "Upload started");
        Some(UploadRequest {
            ticket: UploadTicket {
                seq: self.latest_upload,
            },
            path,
        })
    }

    /// Report the outcome of a file read. Only the most recent upload applies.
    ///
    /// A successful read replaces the preview and clears any palette taken
    /// from the previous image.
    pub fn complete_upload(
        &mut self,
        ticket: UploadTicket,
        result: Result<ImagePreview, ReadError>,
    ) -> Completion {
        if ticket.seq != self.latest_upload {
            tracing::debug!(seq = ticket.seq, "Discarding superseded upload");
            return Completion::Stale;
        }
        self.upload_pending = false;

        match result {
            Ok(preview) => {
                self.preview = Some(preview);
                self.generation += 1;
                self.palette = PaletteState::Empty;
                self.read_error = None;
                tracing::debug!(generation = self.generation, "Preview replaced");
            }
            Err(e) => {
                tracing::warn!("Image read failed: {}", e);
                self.read_error = Some(e);
            }
        }
        Completion::Applied
    }

    /// Start an extraction of the current preview.
    pub fn begin_extraction(&mut self) -> Result<ExtractionJob, ExtractionError> {
        let preview = self.preview.clone().ok_or(ExtractionError::NoPreview)?;
        self.latest_extraction += 1;
        self.extractions_in_flight += 1;
        Ok(ExtractionJob {
            ticket: ExtractionTicket {
                generation: self.generation,
                seq: self.latest_extraction,
            },
            preview,
        })
    }

    /// Report the outcome of an extraction.
    ///
    /// Results for a preview that has since been replaced are dropped. For
    /// the current preview the last completion wins, whatever order the
    /// extractions started in.
    pub fn complete_extraction(
        &mut self,
        ticket: ExtractionTicket,
        result: Result<Palette, ExtractionError>,
    ) -> Completion {
        self.extractions_in_flight = self.extractions_in_flight.saturating_sub(1);
        if ticket.generation != self.generation {
            tracing::debug!(seq = ticket.seq, "Discarding extraction for a replaced preview");
            return Completion::Stale;
        }

        self.palette = match result {
            Ok(palette) => PaletteState::Ready(palette),
            Err(e) => {
                tracing::warn!("Palette extraction failed: {}", e);
                PaletteState::Failed(e)
            }
        };
        Completion::Applied
    }

    /// Copy the code of swatch `index` to the clipboard.
    pub fn copy_swatch(
        &self,
        index: usize,
        clipboard: &mut dyn Clipboard,
    ) -> Result<HexCode, ClipboardError> {
        let code = self
            .palette()
            .and_then(|p| p.get(index))
            .ok_or(ClipboardError::NoSwatch(index))?
            .clone();
        clipboard.set_text(code.as_str())?;
        Ok(code)
    }

    pub fn phase(&self) -> Phase {
        match (&self.preview, &self.palette) {
            (None, _) => Phase::Idle,
            (Some(_), PaletteState::Ready(_)) => Phase::HasPalette,
            (Some(_), _) => Phase::HasPreview,
        }
    }

    pub fn preview(&self) -> Option<&ImagePreview> {
        self.preview.as_ref()
    }

    pub fn palette_state(&self) -> &PaletteState {
        &self.palette
    }

    pub fn palette(&self) -> Option<&Palette> {
        match &self.palette {
            PaletteState::Ready(palette) => Some(palette),
            _ => None,
        }
    }

    pub fn extraction_error(&self) -> Option<&ExtractionError> {
        match &self.palette {
            PaletteState::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn read_error(&self) -> Option<&ReadError> {
        self.read_error.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_uploading(&self) -> bool {
        self.upload_pending
    }

    pub fn is_extracting(&self) -> bool {
        self.extractions_in_flight > 0
    }

    /// Forget a shown read error.
    pub fn clear_read_error(&mut self) {
        self.read_error = None;
    }
}

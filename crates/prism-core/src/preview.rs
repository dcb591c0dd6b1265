// ABOUTME: Image preview held as a data URI
// ABOUTME: Reads selected files, sniffs the image type, and decodes back to pixels

use base64::Engine;
use image::RgbaImage;
use std::fmt;
use std::path::Path;

use crate::error::{ExtractionError, ReadError};

const DATA_SCHEME: &str = "data:";
const BASE64_SUFFIX: &str = ";base64";

/// Decoded pixel surface of a preview.
pub type Surface = RgbaImage;

/// An uploaded image encoded as `data:<mime>;base64,<payload>`.
#[derive(Clone, PartialEq, Eq)]
pub struct ImagePreview {
    uri: String,
    /// Byte offset of the payload (just past the comma).
    payload_start: usize,
}

impl ImagePreview {
    /// Build a preview from raw file bytes.
    ///
    /// The bytes must sniff as an image; anything else is rejected the way a
    /// picker restricted to `image/*` would.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ReadError> {
        if bytes.is_empty() {
            return Err(ReadError::Empty);
        }
        let format = image::guess_format(bytes).map_err(|_| ReadError::UnsupportedFormat)?;
        let mime = format.to_mime_type();
        let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
        let header = format!("{DATA_SCHEME}{mime}{BASE64_SUFFIX},");
        let payload_start = header.len();
        Ok(Self {
            uri: header + &payload,
            payload_start,
        })
    }

    /// Read a file asynchronously and encode it.
    pub async fn read(path: &Path) -> Result<Self, ReadError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| ReadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "Read image file");
        Self::from_bytes(&bytes)
    }

    /// Blocking variant of [`ImagePreview::read`] for one-shot commands.
    pub fn read_blocking(path: &Path) -> Result<Self, ReadError> {
        let bytes = std::fs::read(path).map_err(|source| ReadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&bytes)
    }

    /// Parse an existing data URI. Only base64 payloads with an `image/*`
    /// media type are accepted.
    pub fn parse(uri: &str) -> Result<Self, ReadError> {
        let rest = uri
            .strip_prefix(DATA_SCHEME)
            .ok_or_else(|| ReadError::InvalidDataUri("missing data: scheme".into()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| ReadError::InvalidDataUri("missing comma".into()))?;
        let mime = header
            .strip_suffix(BASE64_SUFFIX)
            .ok_or_else(|| ReadError::InvalidDataUri("payload is not base64".into()))?;
        if !mime.starts_with("image/") {
            return Err(ReadError::UnsupportedFormat);
        }
        base64::engine::general_purpose::STANDARD.decode(payload)?;
        Ok(Self {
            uri: uri.to_string(),
            payload_start: DATA_SCHEME.len() + header.len() + 1,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.uri
    }

    /// The media type, e.g. `image/png`.
    pub fn mime(&self) -> &str {
        let header = &self.uri[DATA_SCHEME.len()..self.payload_start - 1];
        header.strip_suffix(BASE64_SUFFIX).unwrap_or(header)
    }

    /// The original file bytes.
    pub fn decode_bytes(&self) -> Result<Vec<u8>, ReadError> {
        let payload = &self.uri[self.payload_start..];
        Ok(base64::engine::general_purpose::STANDARD.decode(payload)?)
    }

    /// Decode the preview into an RGBA pixel surface.
    pub fn render(&self) -> Result<Surface, ExtractionError> {
        let bytes = self.decode_bytes()?;
        let image = image::load_from_memory(&bytes)?;
        Ok(image.to_rgba8())
    }

    /// Size of the encoded URI in bytes.
    pub fn len(&self) -> usize {
        self.uri.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uri.is_empty()
    }
}

impl fmt::Debug for ImagePreview {
    // Payloads are large; show only the header and size.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImagePreview")
            .field("mime", &self.mime())
            .field("len", &self.uri.len())
            .finish()
    }
}

impl fmt::Display for ImagePreview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba};
    use std::io::Cursor;

    fn png_bytes(image: &RgbaImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn checkerboard() -> RgbaImage {
        RgbaImage::from_fn(3, 2, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([10, 200, 30, 255])
            } else {
                Rgba([250, 5, 90, 128])
            }
        })
    }

    #[test]
    fn test_from_bytes_builds_png_data_uri() {
        let preview = ImagePreview::from_bytes(&png_bytes(&checkerboard())).unwrap();
        assert!(preview.as_str().starts_with("data:image/png;base64,"));
        assert_eq!(preview.mime(), "image/png");
    }

    #[test]
    fn test_render_restores_pixels() {
        let original = checkerboard();
        let preview = ImagePreview::from_bytes(&png_bytes(&original)).unwrap();
        let surface = preview.render().unwrap();
        assert_eq!(surface.dimensions(), original.dimensions());
        assert_eq!(surface.as_raw(), original.as_raw());
    }

    #[test]
    fn test_decode_bytes_matches_input() {
        let bytes = png_bytes(&checkerboard());
        let preview = ImagePreview::from_bytes(&bytes).unwrap();
        assert_eq!(preview.decode_bytes().unwrap(), bytes);
    }

    #[test]
    fn test_from_bytes_rejects_empty() {
        assert!(matches!(
            ImagePreview::from_bytes(&[]),
            Err(ReadError::Empty)
        ));
    }

    #[test]
    fn test_from_bytes_rejects_text() {
        assert!(matches!(
            ImagePreview::from_bytes(b"just some notes"),
            Err(ReadError::UnsupportedFormat)
        ));
    }

    #[test]
    fn test_parse_round_trip() {
        let preview = ImagePreview::from_bytes(&png_bytes(&checkerboard())).unwrap();
        let parsed = ImagePreview::parse(preview.as_str()).unwrap();
        assert_eq!(parsed, preview);
        assert_eq!(parsed.mime(), "image/png");
    }

    #[test]
    fn test_parse_rejects_malformed_uris() {
        assert!(matches!(
            ImagePreview::parse("image/png;base64,AAAA"),
            Err(ReadError::InvalidDataUri(_))
        ));
        assert!(matches!(
            ImagePreview::parse("data:image/png;base64"),
            Err(ReadError::InvalidDataUri(_))
        ));
        assert!(matches!(
            ImagePreview::parse("data:image/png,AAAA"),
            Err(ReadError::InvalidDataUri(_))
        ));
        assert!(matches!(
            ImagePreview::parse("data:text/plain;base64,AAAA"),
            Err(ReadError::UnsupportedFormat)
        ));
        assert!(matches!(
            ImagePreview::parse("data:image/png;base64,***"),
            Err(ReadError::Base64(_))
        ));
    }

    #[test]
    fn test_render_fails_on_truncated_image() {
        let mut bytes = png_bytes(&checkerboard());
        bytes.truncate(40);
        let preview = ImagePreview::from_bytes(&bytes).unwrap();
        assert!(matches!(preview.render(), Err(ExtractionError::Decode(_))));
    }

    #[test]
    fn test_debug_hides_payload() {
        let preview = ImagePreview::from_bytes(&png_bytes(&checkerboard())).unwrap();
        let debug_str = format!("{:?}", preview);
        assert!(debug_str.contains("image/png"));
        assert!(!debug_str.contains("base64,"));
    }

    #[tokio::test]
    async fn test_read_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.png");
        std::fs::write(&path, png_bytes(&checkerboard())).unwrap();

        let preview = ImagePreview::read(&path).await.unwrap();
        assert_eq!(preview.render().unwrap().as_raw(), checkerboard().as_raw());
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.png");

        let err = ImagePreview::read(&path).await.unwrap_err();
        match err {
            ReadError::Io { path: failed, .. } => assert_eq!(failed, path),
            other => panic!("Expected Io error, got: {:?}", other),
        }
    }
}

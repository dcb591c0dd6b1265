// ABOUTME: Preview command implementation.
// ABOUTME: Prints the data URI an image would be previewed with.

use prism_core::ImagePreview;
use std::path::Path;

use crate::error::Result;

pub fn run(image: &Path) -> Result<()> {
    let preview = ImagePreview::read_blocking(image)?;
    tracing::info!(mime = preview.mime(), bytes = preview.len(), "Encoded preview");
    println!("{}", preview);
    Ok(())
}

// ABOUTME: Clipboard seam for copying swatch codes
// ABOUTME: System clipboard via arboard, plus in-memory and unavailable fallbacks

use crate::error::ClipboardError;

pub trait Clipboard {
    /// Replace the clipboard contents with `text`.
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The platform clipboard.
pub struct SystemClipboard {
    manager: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, ClipboardError> {
        let manager =
            arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        Ok(Self { manager })
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.manager.set_text(text.to_string())?;
        Ok(())
    }
}

/// Holds the last copied text; used when no system clipboard is wanted.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// Stand-in when the platform clipboard could not be opened.
#[derive(Debug, Clone)]
pub struct UnavailableClipboard {
    reason: String,
}

impl UnavailableClipboard {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Clipboard for UnavailableClipboard {
    fn set_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable(self.reason.clone()))
    }
}

/// Open the system clipboard, falling back to [`UnavailableClipboard`].
pub fn system_or_unavailable() -> Box<dyn Clipboard> {
    match SystemClipboard::new() {
        Ok(clipboard) => Box::new(clipboard),
        Err(e) => {
            tracing::warn!("Failed to initialize clipboard: {}", e);
            Box::new(UnavailableClipboard::new(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard_replaces_contents() {
        let mut clipboard = MemoryClipboard::new();
        assert_eq!(clipboard.contents(), None);
        clipboard.set_text("#ff0000").unwrap();
        clipboard.set_text("#00ff00").unwrap();
        assert_eq!(clipboard.contents(), Some("#00ff00"));
    }

    #[test]
    fn test_unavailable_clipboard_errors() {
        let mut clipboard = UnavailableClipboard::new("no display");
        let err = clipboard.set_text("#ffffff").unwrap_err();
        assert!(matches!(err, ClipboardError::Unavailable(_)));
        assert!(err.to_string().contains("no display"));
    }
}

//! System clipboard exporter backed by arboard.
//!
//! Compiled only with the `clipboard` feature.

use arboard::Clipboard;
use parking_lot::Mutex;

use super::Exporter;
use crate::errors::ExportError;

/// Arboard-based system clipboard.
pub struct ArboardClipboard {
    clipboard: Mutex<Clipboard>,
}

impl ArboardClipboard {
    /// Opens the system clipboard.
    pub fn new() -> Result<Self, ExportError> {
        let clipboard = Clipboard::new().map_err(|e| ExportError::Unavailable(e.to_string()))?;
        Ok(Self {
            clipboard: Mutex::new(clipboard),
        })
    }
}

impl std::fmt::Debug for ArboardClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArboardClipboard").finish_non_exhaustive()
    }
}

impl Exporter for ArboardClipboard {
    fn copy(&self, text: &str) -> Result<(), ExportError> {
        self.clipboard
            .lock()
            .set_text(text)
            .map_err(|e| ExportError::Rejected(e.to_string()))
    }
}

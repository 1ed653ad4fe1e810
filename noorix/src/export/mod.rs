//! Export of produced stage text (e.g. to the system clipboard).
//!
//! Export is never part of the generation state machine: a failed export is
//! logged and reported to the caller, and pipeline state is left untouched.

use tracing::{info, warn};

use crate::core::StageResult;
use crate::errors::ExportError;

#[cfg(feature = "clipboard")]
mod clipboard;

#[cfg(feature = "clipboard")]
pub use clipboard::ArboardClipboard;

/// Capability: export a piece of text.
pub trait Exporter: Send + Sync {
    /// Copies `text` to the export target.
    fn copy(&self, text: &str) -> Result<(), ExportError>;
}

/// Exports the text of an already-produced stage result.
///
/// Failures are logged at `warn` and returned; they never escalate further.
pub fn export_stage_result(exporter: &dyn Exporter, result: &StageResult) -> Result<(), ExportError> {
    match exporter.copy(result.text()) {
        Ok(()) => {
            info!(stage = %result.stage(), chars = result.text().chars().count(), "Copied stage text");
            Ok(())
        }
        Err(e) => {
            warn!(stage = %result.stage(), error = %e, "Failed to copy stage text");
            Err(e)
        }
    }
}

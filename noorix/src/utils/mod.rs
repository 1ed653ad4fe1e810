//! Utility functions for run identifiers, timestamps and log-safe text.

use chrono::Utc;
use uuid::Uuid;

/// Returns the current UTC time as an ISO 8601 formatted string.
///
/// Format: `YYYY-MM-DDTHH:MM:SS.ffffff+00:00`
///
/// # Examples
///
/// ```
/// use noorix::utils::iso_timestamp;
///
/// let ts = iso_timestamp();
/// assert!(ts.contains('T'));
/// assert!(ts.ends_with("+00:00"));
/// ```
#[must_use]
pub fn iso_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.6f+00:00").to_string()
}

/// Generates a time-ordered identifier for a pipeline run.
#[must_use]
pub fn generate_run_id() -> Uuid {
    Uuid::now_v7()
}

/// Shortens `text` to at most `max_chars` characters, appending an ellipsis when cut.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

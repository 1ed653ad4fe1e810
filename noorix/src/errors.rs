//! Error types for noorix.
//!
//! Three families of failure exist:
//!
//! - [`NoorixError`]: the crate-wide error returned from public entry points.
//! - [`GenerationError`]: failures reported by a [`TextGenerator`](crate::service::TextGenerator).
//! - [`ExportError`]: failures reported by an [`Exporter`](crate::export::Exporter).
//!
//! Stage failures inside a pipeline run are never returned as `Err`; they are
//! folded into [`PipelineState::failure`](crate::core::PipelineState).

use crate::core::{PipelineFailure, Stage};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// The main error type for noorix operations.
#[derive(Debug, Error)]
pub enum NoorixError {
    /// The caller supplied unusable input (e.g. an empty idea).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The generation service failed for a specific stage.
    #[error("{stage} stage failed: {reason}")]
    ServiceFailure {
        /// The stage whose service call failed.
        stage: Stage,
        /// Diagnostic reason reported by the service.
        reason: String,
    },

    /// Exporting a stage result failed.
    #[error("{0}")]
    Export(#[from] ExportError),

    /// Configuration is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client construction failed.
    #[cfg(feature = "gemini")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl NoorixError {
    /// Returns the stage this error is attributed to, if any.
    #[must_use]
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::ServiceFailure { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Returns true if the error was caused by caller input.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

/// Failure reported by the generative text service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The request could not be delivered (connect, timeout, decode).
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("service returned status {code}: {body}")]
    Status {
        /// HTTP status code.
        code: u16,
        /// Response body, possibly truncated.
        body: String,
    },

    /// The service answered but produced no usable text.
    #[error("service returned no text")]
    EmptyResponse,

    /// The service refused the prompt.
    #[error("prompt blocked: {0}")]
    Blocked(String),
}

impl From<PipelineFailure> for NoorixError {
    fn from(failure: PipelineFailure) -> Self {
        Self::ServiceFailure {
            stage: failure.stage,
            reason: failure.reason,
        }
    }
}

/// Failure reported by an exporter such as the system clipboard.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    /// The export target could not be reached.
    #[error("Export target unavailable: {0}")]
    Unavailable(String),

    /// The export target refused the content.
    #[error("Export rejected: {0}")]
    Rejected(String),
}

/// Serializable summary of a stage failure, used in events and JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FailureInfo {
    /// Short error code (e.g. "SERVICE-FAILURE").
    pub code: String,
    /// Human-readable summary.
    pub summary: String,
    /// Additional context key-value pairs.
    #[serde(default)]
    pub context: HashMap<String, String>,
}

impl FailureInfo {
    /// Creates a new failure info.
    #[must_use]
    pub fn new(code: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            summary: summary.into(),
            context: HashMap::new(),
        }
    }

    /// Adds a single context entry.
    #[must_use]
    pub fn with_context_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }
}

impl From<&NoorixError> for FailureInfo {
    fn from(error: &NoorixError) -> Self {
        let code = match error {
            NoorixError::InvalidInput(_) => "INVALID-INPUT",
            NoorixError::ServiceFailure { .. } => "SERVICE-FAILURE",
            NoorixError::Export(_) => "EXPORT-FAILURE",
            NoorixError::Config(_) => "CONFIG",
            #[cfg(feature = "gemini")]
            NoorixError::Http(_) => "HTTP",
            NoorixError::Serialization(_) => "SERIALIZATION",
            NoorixError::Io(_) => "IO",
        };
        let info = Self::new(code, error.to_string());
        match error.stage() {
            Some(stage) => info.with_context_entry("stage", stage.as_str()),
            None => info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_failure_display() {
        let failure = PipelineFailure::new(
            Stage::Description,
            GenerationError::EmptyResponse.to_string(),
        );
        let err = NoorixError::from(failure);
        assert_eq!(err.to_string(), "description stage failed: service returned no text");
        assert_eq!(err.stage(), Some(Stage::Description));
    }

    #[test]
    fn test_invalid_input() {
        let err = NoorixError::InvalidInput("idea is empty".to_string());
        assert!(err.is_invalid_input());
        assert_eq!(err.stage(), None);
    }

    #[test]
    fn test_export_error_conversion() {
        let err: NoorixError = ExportError::Unavailable("no display".to_string()).into();
        assert!(matches!(err, NoorixError::Export(_)));
        assert_eq!(err.to_string(), "Export target unavailable: no display");
    }

    #[test]
    fn test_status_error_display() {
        let err = GenerationError::Status {
            code: 429,
            body: "quota".to_string(),
        };
        assert_eq!(err.to_string(), "service returned status 429: quota");
    }

    #[test]
    fn test_failure_info_from_error() {
        let err = NoorixError::from(PipelineFailure::new(Stage::Hashtags, "transport error: timeout"));
        let info = FailureInfo::from(&err);
        assert_eq!(info.code, "SERVICE-FAILURE");
        assert_eq!(info.context.get("stage"), Some(&"hashtags".to_string()));

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["code"], "SERVICE-FAILURE");
    }
}

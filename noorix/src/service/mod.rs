//! Generative text service boundary.
//!
//! The pipeline only needs one capability: turn a prompt into text. Anything
//! implementing [`TextGenerator`] can back a pipeline, including the
//! deterministic fakes in [`crate::testing`].

use async_trait::async_trait;

use crate::errors::GenerationError;

#[cfg(feature = "gemini")]
mod gemini;

#[cfg(feature = "gemini")]
pub use gemini::GeminiGenerator;

/// Capability: generate text from a prompt.
///
/// A call is single-shot. Implementations must not retry internally; the
/// pipeline does not assume idempotence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates text for `prompt` using the model identified by `model`.
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, GenerationError>;
}

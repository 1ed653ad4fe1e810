//! # Noorix
//!
//! Turns one content idea into a title, a description and a set of hashtags
//! by driving three dependent calls to a generative text service.
//!
//! Noorix provides:
//!
//! - **Prompt composition**: role-qualified prompts for each generation stage
//! - **Sequential pipeline**: title, then description, then hashtags, each
//!   prompt built from the previous stage's text
//! - **Observable progress**: every stage transition is published before the
//!   service call it announces
//! - **Pluggable capabilities**: text generation and clipboard export sit
//!   behind narrow traits so tests can use deterministic fakes
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use noorix::prelude::*;
//! use std::sync::Arc;
//!
//! let generator = Arc::new(GeminiGenerator::from_env(&GeneratorConfig::default())?);
//! let pipeline = GenerationPipeline::new(generator);
//!
//! let request = GenerationRequest::new("sustainable living blog", LengthPreference::Medium);
//! let state = pipeline.run(request).await?;
//!
//! println!("{}", state.results.title().unwrap_or_default());
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod config;
pub mod core;
pub mod errors;
pub mod events;
pub mod export;
pub mod observability;
pub mod pipeline;
pub mod prompts;
pub mod service;
pub mod session;
pub mod testing;
pub mod utils;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{GeneratorConfig, NoorixConfig, PipelineConfig};
    pub use crate::core::{
        ActiveStage, GenerationRequest, LengthPreference, PipelineFailure,
        PipelineState, Stage, StageEvent, StageResult, StageResults,
    };
    pub use crate::errors::{ExportError, GenerationError, NoorixError};
    pub use crate::events::{CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink};
    pub use crate::export::{export_stage_result, Exporter};
    pub use crate::pipeline::GenerationPipeline;
    pub use crate::prompts::{
        compose_description_prompt, compose_hashtags_prompt, compose_title_prompt,
        ROLE_PREAMBLE,
    };
    pub use crate::service::TextGenerator;
    pub use crate::session::GenerationSession;
    pub use crate::utils::{generate_run_id, iso_timestamp};

    #[cfg(feature = "gemini")]
    pub use crate::service::GeminiGenerator;
}

//! Generation pipeline.
//!
//! This module provides:
//! - [`GenerationPipeline`], the stateful orchestrator running the title,
//!   description and hashtags stages strictly in order
//! - Progress observation through a `tokio::sync::watch` channel

mod generation;

pub use generation::GenerationPipeline;

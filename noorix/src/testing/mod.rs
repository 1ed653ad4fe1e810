//! Testing utilities for noorix pipelines.
//!
//! This module provides:
//! - A scripted text generator and in-memory exporters
//! - Assertions over pipeline states
//! - Fixtures wiring fakes into a pipeline

mod assertions;
mod fixtures;
mod mocks;

pub use assertions::{
    assert_failed_at, assert_stage_populated, assert_stage_text, assert_terminal_success,
};
pub use fixtures::{sample_request, TestPipeline, SAMPLE_IDEA};
pub use mocks::{
    stage_of_prompt, FailingExporter, MemoryExporter, ScriptedGenerator, DEFAULT_DESCRIPTION,
    DEFAULT_HASHTAGS, DEFAULT_TITLE,
};

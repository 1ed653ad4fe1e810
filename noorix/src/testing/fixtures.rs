//! Shared fixtures for pipeline tests.

use std::sync::Arc;

use super::ScriptedGenerator;
use crate::core::{GenerationRequest, LengthPreference};
use crate::events::CollectingEventSink;
use crate::pipeline::GenerationPipeline;

/// Idea used by the reference scenario.
pub const SAMPLE_IDEA: &str = "sustainable living blog";

/// Returns the reference request: the sample idea at medium length.
#[must_use]
pub fn sample_request() -> GenerationRequest {
    GenerationRequest::new(SAMPLE_IDEA, LengthPreference::Medium)
}

/// A pipeline wired to a scripted generator and a collecting sink.
#[derive(Debug)]
pub struct TestPipeline {
    /// The pipeline under test.
    pub pipeline: GenerationPipeline,
    /// The generator backing the pipeline, observing its state.
    pub generator: Arc<ScriptedGenerator>,
    /// Sink receiving the pipeline's events.
    pub events: Arc<CollectingEventSink>,
}

impl TestPipeline {
    /// Wires `generator` into a new pipeline.
    #[must_use]
    pub fn new(generator: ScriptedGenerator) -> Self {
        let generator = Arc::new(generator);
        let events = Arc::new(CollectingEventSink::new());
        let pipeline = GenerationPipeline::new(generator.clone()).with_event_sink(events.clone());
        generator.observe(pipeline.subscribe());
        Self {
            pipeline,
            generator,
            events,
        }
    }
}

impl Default for TestPipeline {
    fn default() -> Self {
        Self::new(ScriptedGenerator::new())
    }
}

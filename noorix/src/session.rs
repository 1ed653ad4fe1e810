//! Caller-facing session around a [`GenerationPipeline`].
//!
//! A session holds what a form would: the draft idea and the selected length.
//! After every resolved run the draft is cleared so the next run starts from
//! a fresh entry.

use serde_json::json;

use crate::core::{GenerationRequest, LengthPreference, PipelineState, Stage};
use crate::errors::NoorixError;
use crate::export::{export_stage_result, Exporter};
use crate::pipeline::GenerationPipeline;

/// Draft input plus the pipeline it feeds.
#[derive(Debug)]
pub struct GenerationSession {
    pipeline: GenerationPipeline,
    idea: String,
    length: LengthPreference,
}

impl GenerationSession {
    /// Creates a session with an empty draft and the default length.
    #[must_use]
    pub fn new(pipeline: GenerationPipeline) -> Self {
        Self {
            pipeline,
            idea: String::new(),
            length: LengthPreference::default(),
        }
    }

    /// Replaces the draft idea.
    pub fn set_idea(&mut self, idea: impl Into<String>) {
        self.idea = idea.into();
    }

    /// Returns the draft idea.
    #[must_use]
    pub fn idea(&self) -> &str {
        &self.idea
    }

    /// Selects the description length.
    pub fn set_length(&mut self, length: LengthPreference) {
        self.length = length;
    }

    /// Returns the selected description length.
    #[must_use]
    pub fn length(&self) -> LengthPreference {
        self.length
    }

    /// Returns the underlying pipeline.
    #[must_use]
    pub fn pipeline(&self) -> &GenerationPipeline {
        &self.pipeline
    }

    /// Returns a snapshot of the pipeline state.
    #[must_use]
    pub fn state(&self) -> PipelineState {
        self.pipeline.state()
    }

    /// Returns true while a run is in flight; callers disable re-triggering on it.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.pipeline.is_busy()
    }

    /// Returns the most relevant progress line, if any.
    #[must_use]
    pub fn status_line(&self) -> Option<String> {
        self.pipeline.state().progress_lines().pop()
    }

    /// Runs the pipeline on the draft and clears the draft afterwards.
    ///
    /// An empty draft is rejected and left as is.
    pub async fn generate(&mut self) -> Result<PipelineState, NoorixError> {
        if self.idea.trim().is_empty() {
            return Err(NoorixError::InvalidInput("idea must not be empty".to_string()));
        }
        let request = GenerationRequest::new(self.idea.clone(), self.length);
        let outcome = self.pipeline.run(request).await;
        self.idea.clear();
        outcome
    }

    /// Copies the text produced for `stage` through `exporter`.
    ///
    /// Export failures are returned to the caller only; pipeline state is not touched.
    pub async fn copy(&self, stage: Stage, exporter: &dyn Exporter) -> Result<(), NoorixError> {
        let Some(result) = self.pipeline.state().results.result(stage) else {
            return Err(NoorixError::InvalidInput(format!("no {stage} text to copy")));
        };
        let sink = self.pipeline.event_sink();
        match export_stage_result(exporter, &result) {
            Ok(()) => {
                sink.emit("export.completed", Some(json!({"stage": stage.as_str()}))).await;
                Ok(())
            }
            Err(e) => {
                sink.emit(
                    "export.failed",
                    Some(json!({"stage": stage.as_str(), "error": e.to_string()})),
                )
                .await;
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GenerationError;
    use crate::events::CollectingEventSink;
    use crate::testing::{
        assert_failed_at, assert_terminal_success, FailingExporter, MemoryExporter,
        ScriptedGenerator, TestPipeline, DEFAULT_TITLE,
    };
    use std::sync::Arc;
    use std::time::Duration;

    fn session(
        generator: ScriptedGenerator,
    ) -> (GenerationSession, Arc<ScriptedGenerator>, Arc<CollectingEventSink>) {
        let TestPipeline {
            pipeline,
            generator,
            events,
        } = TestPipeline::new(generator);
        (GenerationSession::new(pipeline), generator, events)
    }

    #[tokio::test]
    async fn test_generate_clears_draft() {
        let (mut session, _, _) = session(ScriptedGenerator::new());
        session.set_idea("sustainable living blog");
        session.set_length(LengthPreference::Small);

        let state = session.generate().await.unwrap();

        assert_terminal_success(&state);
        assert_eq!(session.idea(), "");
        assert_eq!(session.length(), LengthPreference::Small);
        assert_eq!(session.status_line().as_deref(), Some("All content generated!"));
    }

    #[tokio::test]
    async fn test_generate_clears_draft_after_failure() {
        let (mut session, _, _) = session(
            ScriptedGenerator::new().fail(Stage::Title, GenerationError::Transport("down".into())),
        );
        session.set_idea("sustainable living blog");

        let state = session.generate().await.unwrap();

        assert_failed_at(&state, Stage::Title);
        assert_eq!(session.idea(), "");
        assert_eq!(
            session.status_line().as_deref(),
            Some("Title failed: transport error: down")
        );
    }

    #[tokio::test]
    async fn test_empty_draft_is_rejected() {
        let (mut session, generator, _) = session(ScriptedGenerator::new());
        session.set_idea("   ");

        let err = session.generate().await.unwrap_err();

        assert!(err.is_invalid_input());
        assert_eq!(session.idea(), "   ");
        assert_eq!(generator.call_count(), 0);
        assert_eq!(session.state(), PipelineState::default());
    }

    #[tokio::test]
    async fn test_busy_while_running() {
        let (session, generator, _) =
            session(ScriptedGenerator::new().with_latency(Duration::from_millis(20)));
        let session = Arc::new(tokio::sync::Mutex::new(session));
        let mut rx = session.lock().await.pipeline().subscribe();

        let runner = {
            let session = Arc::clone(&session);
            tokio::spawn(async move {
                let mut session = session.lock().await;
                session.set_idea("sustainable living blog");
                session.generate().await
            })
        };

        rx.changed().await.unwrap();
        assert!(!rx.borrow_and_update().is_idle());

        let state = runner.await.unwrap().unwrap();
        assert_terminal_success(&state);
        assert_eq!(generator.call_count(), 3);
    }

    #[tokio::test]
    async fn test_copy_stage_text() {
        let (mut session, _, events) = session(ScriptedGenerator::new());
        session.set_idea("sustainable living blog");
        session.generate().await.unwrap();

        let exporter = MemoryExporter::new();
        session.copy(Stage::Title, &exporter).await.unwrap();

        assert_eq!(exporter.last().as_deref(), Some(DEFAULT_TITLE));
        assert_eq!(events.events_of_type("export.completed").len(), 1);
    }

    #[tokio::test]
    async fn test_copy_failure_leaves_state_untouched() {
        let (mut session, _, events) = session(ScriptedGenerator::new());
        session.set_idea("sustainable living blog");
        let before = session.generate().await.unwrap();

        let err = session
            .copy(Stage::Hashtags, &FailingExporter::new("clipboard locked"))
            .await
            .unwrap_err();

        assert!(matches!(err, NoorixError::Export(_)));
        assert_eq!(session.state(), before);
        assert!(session.state().failure.is_none());
        assert_eq!(events.events_of_type("export.failed").len(), 1);
    }

    #[tokio::test]
    async fn test_copy_missing_stage() {
        let (session, _, _) = session(ScriptedGenerator::new());
        let err = session
            .copy(Stage::Description, &MemoryExporter::new())
            .await
            .unwrap_err();
        assert!(err.is_invalid_input());
    }
}

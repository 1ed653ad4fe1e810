//! Sequential title → description → hashtags generation.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::config::{GeneratorConfig, NoorixConfig, PipelineConfig};
use crate::core::{
    GenerationRequest, PipelineFailure, PipelineState, Stage, StageEvent, StageResult,
};
use crate::errors::{GenerationError, NoorixError};
use crate::events::{emit_event, EventSink, NoOpEventSink};
use crate::observability::SpanTimer;
use crate::prompts::compose_stage_prompt;
use crate::service::TextGenerator;
use crate::utils::generate_run_id;

/// Drives the three generation stages in dependency order.
///
/// The pipeline is the only writer of its [`PipelineState`]. Observers read
/// it through [`state`](Self::state) or follow transitions through
/// [`subscribe`](Self::subscribe). Runs must be serialized by the caller;
/// [`is_busy`](Self::is_busy) tells whether one is in flight.
pub struct GenerationPipeline {
    generator: Arc<dyn TextGenerator>,
    sink: Arc<dyn EventSink>,
    model: String,
    config: PipelineConfig,
    state: watch::Sender<PipelineState>,
}

impl std::fmt::Debug for GenerationPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationPipeline")
            .field("model", &self.model)
            .field("config", &self.config)
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

impl GenerationPipeline {
    /// Creates a pipeline with the default model and configuration.
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        let (state, _) = watch::channel(PipelineState::default());
        Self {
            generator,
            sink: Arc::new(NoOpEventSink),
            model: GeneratorConfig::default().model,
            config: PipelineConfig::default(),
            state,
        }
    }

    /// Creates a pipeline using the model and pipeline settings from `config`.
    #[must_use]
    pub fn from_config(generator: Arc<dyn TextGenerator>, config: &NoorixConfig) -> Self {
        Self::new(generator)
            .with_model(config.generator.model.clone())
            .with_config(config.pipeline.clone())
    }

    /// Sets the event sink receiving lifecycle events.
    #[must_use]
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Sets the model identifier passed to the generator.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the pipeline behaviour settings.
    #[must_use]
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the model identifier.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the event sink.
    #[must_use]
    pub fn event_sink(&self) -> Arc<dyn EventSink> {
        Arc::clone(&self.sink)
    }

    /// Returns a snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> PipelineState {
        self.state.borrow().clone()
    }

    /// Returns a receiver notified on every state transition.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<PipelineState> {
        self.state.subscribe()
    }

    /// Returns true while a stage is running.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        !self.state.borrow().is_idle()
    }

    /// Runs all three stages for `request` and returns the terminal state.
    ///
    /// An empty idea is rejected with [`NoorixError::InvalidInput`] before any
    /// state change or service call. Stage failures do not produce `Err`:
    /// they end the run early, are recorded in [`PipelineState::failure`],
    /// and leave the results of completed stages in place.
    pub async fn run(&self, request: GenerationRequest) -> Result<PipelineState, NoorixError> {
        if request.is_blank() {
            warn!("Rejected generation request with empty idea");
            self.sink
                .emit("pipeline.rejected", Some(serde_json::json!({"reason": "empty idea"})))
                .await;
            return Err(NoorixError::InvalidInput("idea must not be empty".to_string()));
        }

        let run_id = generate_run_id();
        let span = info_span!("generation_run", %run_id, model = %self.model);
        self.execute_run(run_id, &request).instrument(span).await
    }

    async fn execute_run(
        &self,
        run_id: Uuid,
        request: &GenerationRequest,
    ) -> Result<PipelineState, NoorixError> {
        self.state.send_modify(|state| state.begin(run_id));
        info!(length = %request.length(), "Generation started");
        emit_event(
            self.sink.as_ref(),
            StageEvent::new("pipeline.started")
                .add_data("run_id", serde_json::json!(run_id.to_string()))
                .add_data("length", serde_json::json!(request.length().label())),
        )
        .await;

        for stage in Stage::ALL {
            let prompt = compose_stage_prompt(stage, request, &self.state.borrow().results);
            let outcome = match prompt {
                Some(prompt) => self.execute_stage(stage, &prompt).await,
                None => Err(PipelineFailure::new(stage, "upstream result is missing")),
            };
            if let Err(failure) = outcome {
                return Ok(self.abort(run_id, failure).await);
            }
        }

        self.state.send_modify(PipelineState::finish);
        info!("Generation completed");
        emit_event(
            self.sink.as_ref(),
            StageEvent::new("pipeline.completed")
                .add_data("run_id", serde_json::json!(run_id.to_string())),
        )
        .await;

        Ok(self.state())
    }

    async fn execute_stage(&self, stage: Stage, prompt: &str) -> Result<(), PipelineFailure> {
        // Published before the call is dispatched so observers can render it.
        self.state.send_if_modified(|state| {
            state.active_stage.stage() != Some(stage) && state.enter(stage)
        });
        emit_event(self.sink.as_ref(), StageEvent::started(stage)).await;
        debug!(%stage, prompt_chars = prompt.chars().count(), "Dispatching stage");

        let timer = SpanTimer::start(stage.as_str());
        let text = self
            .generator
            .generate(&self.model, prompt)
            .await
            .and_then(|text| self.usable_text(text));
        let duration_ms = timer.finish();

        match text {
            Ok(text) => {
                let chars = text.chars().count();
                self.state.send_modify(|state| {
                    state.complete(StageResult::new(stage, text));
                });
                info!(%stage, duration_ms, chars, "Stage completed");
                emit_event(self.sink.as_ref(), StageEvent::completed(stage, duration_ms, chars)).await;
                Ok(())
            }
            Err(e) => {
                warn!(%stage, duration_ms, error = %e, "Stage failed");
                let reason = e.to_string();
                emit_event(self.sink.as_ref(), StageEvent::failed(stage, &reason)).await;
                Err(PipelineFailure::new(stage, reason))
            }
        }
    }

    fn usable_text(&self, text: String) -> Result<String, GenerationError> {
        let text = if self.config.trim_output {
            text.trim().to_string()
        } else {
            text
        };
        if text.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(text)
    }

    async fn abort(&self, run_id: Uuid, failure: PipelineFailure) -> PipelineState {
        let stage = failure.stage;
        let reason = failure.reason.clone();
        self.state.send_modify(|state| state.fail(failure));

        let state = self.state();
        let completed: Vec<&str> = state.results.completed().iter().map(|s| s.as_str()).collect();
        warn!(%stage, ?completed, "Generation aborted");
        emit_event(
            self.sink.as_ref(),
            StageEvent::new("pipeline.failed")
                .add_data("run_id", serde_json::json!(run_id.to_string()))
                .add_data("stage", serde_json::json!(stage.as_str()))
                .add_data("error", serde_json::json!(reason))
                .add_data("completed", serde_json::json!(completed)),
        )
        .await;
        state
    }
}

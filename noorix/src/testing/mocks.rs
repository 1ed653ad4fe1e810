//! Deterministic fakes for the generation and export capabilities.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::watch;

use crate::core::{ActiveStage, PipelineState, Stage};
use crate::errors::{ExportError, GenerationError};
use crate::export::Exporter;
use crate::service::TextGenerator;

/// Default title returned by [`ScriptedGenerator`].
pub const DEFAULT_TITLE: &str = "Sustainable Living Made Simple: Are You Ready to Go Green?";

/// Default description returned by [`ScriptedGenerator`].
pub const DEFAULT_DESCRIPTION: &str =
    "Discover practical, budget-friendly habits that cut waste and make your home greener.";

/// Default hashtags returned by [`ScriptedGenerator`].
pub const DEFAULT_HASHTAGS: &str =
    "#SustainableLiving #ZeroWaste #EcoFriendly #GreenLiving #SlowLiving #ClimateAction";

/// Infers which stage a prompt was composed for.
#[must_use]
pub fn stage_of_prompt(prompt: &str) -> Option<Stage> {
    if prompt.contains("only one title for this content idea") {
        Some(Stage::Title)
    } else if prompt.contains("only one description for this content title") {
        Some(Stage::Description)
    } else if prompt.contains("hashtags for this content:") {
        Some(Stage::Hashtags)
    } else {
        None
    }
}

fn default_response(stage: Stage) -> Result<String, GenerationError> {
    Ok(match stage {
        Stage::Title => DEFAULT_TITLE,
        Stage::Description => DEFAULT_DESCRIPTION,
        Stage::Hashtags => DEFAULT_HASHTAGS,
    }
    .to_string())
}

/// A text generator answering per stage from a script.
///
/// Every stage succeeds with a fixed default text unless overridden. The
/// generator records prompts and, when given a state receiver via
/// [`observe`](Self::observe), the active stage visible at dispatch time.
#[derive(Debug, Default)]
pub struct ScriptedGenerator {
    scripts: Mutex<HashMap<Stage, Result<String, GenerationError>>>,
    prompts: Mutex<Vec<String>>,
    models: Mutex<Vec<String>>,
    observed: Mutex<Vec<ActiveStage>>,
    observer: Mutex<Option<watch::Receiver<PipelineState>>>,
    latency: Option<Duration>,
    call_count: AtomicUsize,
}

impl ScriptedGenerator {
    /// Creates a generator where every stage succeeds with its default text.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `stage` with `text`.
    #[must_use]
    pub fn respond(self, stage: Stage, text: impl Into<String>) -> Self {
        self.scripts.lock().insert(stage, Ok(text.into()));
        self
    }

    /// Fails `stage` with `error`.
    #[must_use]
    pub fn fail(self, stage: Stage, error: GenerationError) -> Self {
        self.scripts.lock().insert(stage, Err(error));
        self
    }

    /// Waits `latency` before answering each call.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Restores the default answer for `stage`.
    pub fn clear_failure(&self, stage: Stage) {
        self.scripts.lock().remove(&stage);
    }

    /// Records the active stage from `receiver` on every call.
    pub fn observe(&self, receiver: watch::Receiver<PipelineState>) {
        *self.observer.lock() = Some(receiver);
    }

    /// Returns the number of calls made.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Returns the prompts received, in call order.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }

    /// Returns the model identifiers received, in call order.
    #[must_use]
    pub fn models(&self) -> Vec<String> {
        self.models.lock().clone()
    }

    /// Returns the active stage observed at each call.
    #[must_use]
    pub fn observed_stages(&self) -> Vec<ActiveStage> {
        self.observed.lock().clone()
    }

    /// Resets call tracking.
    pub fn reset(&self) {
        self.call_count.store(0, Ordering::SeqCst);
        self.prompts.lock().clear();
        self.models.lock().clear();
        self.observed.lock().clear();
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, GenerationError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().push(prompt.to_string());
        self.models.lock().push(model.to_string());
        if let Some(receiver) = self.observer.lock().as_ref() {
            let active = receiver.borrow().active_stage;
            self.observed.lock().push(active);
        }

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let Some(stage) = stage_of_prompt(prompt) else {
            return Err(GenerationError::EmptyResponse);
        };
        let scripted = self.scripts.lock().get(&stage).cloned();
        scripted.unwrap_or_else(|| default_response(stage))
    }
}

/// An exporter that keeps every copied text in memory.
#[derive(Debug, Default)]
pub struct MemoryExporter {
    copies: Mutex<Vec<String>>,
}

impl MemoryExporter {
    /// Creates an empty exporter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every copied text, oldest first.
    #[must_use]
    pub fn copies(&self) -> Vec<String> {
        self.copies.lock().clone()
    }

    /// Returns the most recently copied text.
    #[must_use]
    pub fn last(&self) -> Option<String> {
        self.copies.lock().last().cloned()
    }
}

impl Exporter for MemoryExporter {
    fn copy(&self, text: &str) -> Result<(), ExportError> {
        self.copies.lock().push(text.to_string());
        Ok(())
    }
}

/// An exporter that always fails.
#[derive(Debug)]
pub struct FailingExporter {
    reason: String,
}

impl FailingExporter {
    /// Creates an exporter rejecting every copy with `reason`.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Exporter for FailingExporter {
    fn copy(&self, _text: &str) -> Result<(), ExportError> {
        Err(ExportError::Rejected(self.reason.clone()))
    }
}

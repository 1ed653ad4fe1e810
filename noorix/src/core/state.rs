//! Pipeline state and its transitions.
//!
//! The state is owned by [`GenerationPipeline`](crate::pipeline::GenerationPipeline);
//! observers only ever see clones of it. Transition methods are crate-private.

use super::{ActiveStage, Stage, StageResult, StageResults};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The stage that failed and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineFailure {
    /// The stage whose service call failed.
    pub stage: Stage,
    /// Diagnostic reason reported by the service.
    pub reason: String,
}

impl PipelineFailure {
    /// Creates a new failure record.
    #[must_use]
    pub fn new(stage: Stage, reason: impl Into<String>) -> Self {
        Self {
            stage,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for PipelineFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} stage failed: {}", self.stage, self.reason)
    }
}

/// Observable state of the generation pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineState {
    /// Identifier of the current or most recent run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<Uuid>,
    /// The stage currently being generated.
    pub active_stage: ActiveStage,
    /// Text produced so far by the current or most recent run.
    #[serde(default)]
    pub results: StageResults,
    /// The failure that ended the most recent run, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<PipelineFailure>,
}

impl PipelineState {
    /// Returns true if no stage is running.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.active_stage.is_idle()
    }

    /// Returns true if the run finished with all three results and no failure.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.is_idle() && self.failure.is_none() && self.results.is_complete()
    }

    /// Returns true if the run ended in a stage failure.
    #[must_use]
    pub fn has_failed(&self) -> bool {
        self.failure.is_some()
    }

    /// Returns one progress line per completed or running stage, as a UI would render it.
    ///
    /// After a failed run the completed stages are listed, followed by the failure.
    #[must_use]
    pub fn progress_lines(&self) -> Vec<String> {
        let Some(running) = self.active_stage.stage() else {
            if let Some(failure) = &self.failure {
                let mut lines: Vec<String> = self
                    .results
                    .completed()
                    .into_iter()
                    .map(|s| format!("{} generated!", s.label()))
                    .collect();
                lines.push(format!("{} failed: {}", failure.stage.label(), failure.reason));
                return lines;
            }
            if !self.results.is_empty() {
                return vec!["All content generated!".to_string()];
            }
            return Vec::new();
        };
        let mut lines: Vec<String> = Stage::ALL
            .into_iter()
            .take_while(|s| *s != running)
            .map(|s| format!("{} generated!", s.label()))
            .collect();
        lines.push(format!("Generating {}...", running.label()));
        lines
    }

    /// Clears results and failure and marks the title stage as running.
    pub(crate) fn begin(&mut self, run_id: Uuid) {
        *self = Self {
            run_id: Some(run_id),
            active_stage: ActiveStage::Title,
            results: StageResults::default(),
            failure: None,
        };
    }

    /// Marks `stage` as running. No-op once the run has failed.
    pub(crate) fn enter(&mut self, stage: Stage) -> bool {
        if self.failure.is_some() {
            return false;
        }
        self.active_stage = stage.into();
        true
    }

    /// Stores the text produced by `stage`. No-op once the run has failed.
    pub(crate) fn complete(&mut self, result: StageResult) -> bool {
        if self.failure.is_some() {
            return false;
        }
        self.results.record(result)
    }

    /// Records a stage failure and returns to idle.
    pub(crate) fn fail(&mut self, failure: PipelineFailure) {
        self.failure = Some(failure);
        self.active_stage = ActiveStage::None;
    }

    /// Returns to idle, keeping results and failure visible.
    pub(crate) fn finish(&mut self) {
        self.active_stage = ActiveStage::None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_initial_state() {
        let state = PipelineState::default();
        assert!(state.is_idle());
        assert!(!state.is_success());
        assert!(!state.has_failed());
        assert!(state.results.is_empty());
        assert!(state.progress_lines().is_empty());
    }

    #[test]
    fn test_begin_resets_previous_run() {
        let mut state = PipelineState::default();
        state.begin(Uuid::new_v4());
        state.complete(StageResult::new(Stage::Title, "old"));
        state.fail(PipelineFailure::new(Stage::Description, "boom"));

        let run_id = Uuid::new_v4();
        state.begin(run_id);
        assert_eq!(state.run_id, Some(run_id));
        assert_eq!(state.active_stage, ActiveStage::Title);
        assert!(state.results.is_empty());
        assert!(state.failure.is_none());
    }

    #[test]
    fn test_no_transitions_after_failure() {
        let mut state = PipelineState::default();
        state.begin(Uuid::new_v4());
        state.fail(PipelineFailure::new(Stage::Title, "down"));

        assert!(!state.enter(Stage::Description));
        assert!(!state.complete(StageResult::new(Stage::Title, "late")));
        assert_eq!(state.active_stage, ActiveStage::None);
        assert!(state.results.is_empty());
    }

    #[test]
    fn test_progress_lines() {
        let mut state = PipelineState::default();
        state.begin(Uuid::new_v4());
        assert_eq!(state.progress_lines(), vec!["Generating Title..."]);

        state.complete(StageResult::new(Stage::Title, "T"));
        state.enter(Stage::Hashtags);
        assert_eq!(
            state.progress_lines(),
            vec!["Title generated!", "Description generated!", "Generating Hashtags..."]
        );

        state.finish();
        assert_eq!(state.progress_lines(), vec!["All content generated!"]);
    }

    #[test]
    fn test_progress_lines_after_failure() {
        let mut state = PipelineState::default();
        state.begin(Uuid::new_v4());
        state.complete(StageResult::new(Stage::Title, "T"));
        state.enter(Stage::Description);
        state.fail(PipelineFailure::new(Stage::Description, "quota exceeded"));

        assert!(!state.is_success());
        assert_eq!(
            state.progress_lines(),
            vec!["Title generated!", "Description failed: quota exceeded"]
        );
    }

    #[test]
    fn test_failure_display() {
        let failure = PipelineFailure::new(Stage::Hashtags, "quota exceeded");
        assert_eq!(failure.to_string(), "hashtags stage failed: quota exceeded");
    }
}

//! Test assertions for pipeline states.

use crate::core::{ActiveStage, PipelineState, Stage};

/// Asserts that the run finished with all three results and no failure.
pub fn assert_terminal_success(state: &PipelineState) {
    assert_eq!(
        state.active_stage,
        ActiveStage::None,
        "Expected idle pipeline, got active stage {:?}",
        state.active_stage
    );
    assert!(
        state.failure.is_none(),
        "Expected no failure, got {:?}",
        state.failure
    );
    for stage in Stage::ALL {
        assert_stage_populated(state, stage);
    }
}

/// Asserts that the run ended idle with a failure attributed to `stage`.
pub fn assert_failed_at(state: &PipelineState, stage: Stage) {
    assert!(state.is_idle(), "Expected idle pipeline after failure");
    let failure = state
        .failure
        .as_ref()
        .unwrap_or_else(|| panic!("Expected failure at {stage}, got none"));
    assert_eq!(
        failure.stage, stage,
        "Expected failure at {stage}, got failure at {}",
        failure.stage
    );
    for later in Stage::ALL.into_iter().filter(|s| *s >= stage) {
        assert!(
            state.results.get(later).is_none(),
            "Expected no {later} result after failure at {stage}"
        );
    }
}

/// Asserts that `stage` has non-empty text.
pub fn assert_stage_populated(state: &PipelineState, stage: Stage) {
    let text = state.results.get(stage);
    assert!(
        text.is_some_and(|t| !t.is_empty()),
        "Expected {stage} text, got {text:?}"
    );
}

/// Asserts that `stage` has exactly `expected` as text.
pub fn assert_stage_text(state: &PipelineState, stage: Stage, expected: &str) {
    assert_eq!(
        state.results.get(stage),
        Some(expected),
        "Unexpected {stage} text"
    );
}

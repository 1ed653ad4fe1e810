//! Stage results and the per-run result set.

use super::Stage;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

// The pattern is a literal; compiling it cannot fail.
#[allow(clippy::expect_used)]
static HASHTAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#[\p{L}\p{N}_]+").expect("hashtag pattern is valid"));

/// Text produced by one stage of one run.
///
/// Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageResult {
    stage: Stage,
    text: String,
}

impl StageResult {
    /// Creates a new stage result.
    #[must_use]
    pub fn new(stage: Stage, text: impl Into<String>) -> Self {
        Self {
            stage,
            text: text.into(),
        }
    }

    /// Returns the stage that produced this result.
    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Returns the generated text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Extracts the individual `#tag` tokens from the text, in order, without duplicates.
    #[must_use]
    pub fn hashtags(&self) -> Vec<String> {
        let mut tags: Vec<String> = Vec::new();
        for found in HASHTAG.find_iter(&self.text) {
            let tag = found.as_str();
            if !tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
                tags.push(tag.to_string());
            }
        }
        tags
    }
}

/// Results of the current run, keyed by stage.
///
/// A later stage's slot is only ever filled when its predecessor's slot is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageResults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hashtags: Option<String>,
}

impl StageResults {
    /// Returns the text recorded for `stage`.
    #[must_use]
    pub fn get(&self, stage: Stage) -> Option<&str> {
        self.slot(stage).as_deref()
    }

    /// Returns the result for `stage` as a [`StageResult`].
    #[must_use]
    pub fn result(&self, stage: Stage) -> Option<StageResult> {
        self.get(stage).map(|text| StageResult::new(stage, text))
    }

    /// Returns the title text.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the description text.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the hashtags text.
    #[must_use]
    pub fn hashtags(&self) -> Option<&str> {
        self.hashtags.as_deref()
    }

    /// Returns true if no stage has produced text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        Stage::ALL.iter().all(|s| self.slot(*s).is_none())
    }

    /// Returns true if every stage has produced text.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        Stage::ALL.iter().all(|s| self.slot(*s).is_some())
    }

    /// Returns the completed stages in execution order.
    #[must_use]
    pub fn completed(&self) -> Vec<Stage> {
        Stage::ALL
            .into_iter()
            .filter(|s| self.slot(*s).is_some())
            .collect()
    }

    /// Stores the text for `stage`.
    ///
    /// Returns false, storing nothing, when the predecessor has no result.
    pub(crate) fn record(&mut self, result: StageResult) -> bool {
        if let Some(previous) = result.stage.predecessor() {
            if self.slot(previous).is_none() {
                return false;
            }
        }
        let StageResult { stage, text } = result;
        *self.slot_mut(stage) = Some(text);
        true
    }

    fn slot(&self, stage: Stage) -> &Option<String> {
        match stage {
            Stage::Title => &self.title,
            Stage::Description => &self.description,
            Stage::Hashtags => &self.hashtags,
        }
    }

    fn slot_mut(&mut self, stage: Stage) -> &mut Option<String> {
        match stage {
            Stage::Title => &mut self.title,
            Stage::Description => &mut self.description,
            Stage::Hashtags => &mut self.hashtags,
        }
    }
}

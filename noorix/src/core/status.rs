//! Stage identifiers and the active-stage discriminant.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three ordered generation steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// The title, generated from the idea.
    Title,
    /// The description, generated from the title.
    Description,
    /// The hashtags, generated from the description and the idea.
    Hashtags,
}

impl Stage {
    /// All stages in execution order.
    pub const ALL: [Self; 3] = [Self::Title, Self::Description, Self::Hashtags];

    /// Returns the stable lowercase name of the stage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Hashtags => "hashtags",
        }
    }

    /// Returns the human-facing label of the stage.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Description => "Description",
            Self::Hashtags => "Hashtags",
        }
    }

    /// Returns the stage whose result this stage depends on.
    #[must_use]
    pub const fn predecessor(self) -> Option<Self> {
        match self {
            Self::Title => None,
            Self::Description => Some(Self::Title),
            Self::Hashtags => Some(Self::Description),
        }
    }

}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "description" => Ok(Self::Description),
            "hashtags" => Ok(Self::Hashtags),
            other => Err(format!("unknown stage '{other}'")),
        }
    }
}

/// The stage currently being generated, or `None` when the pipeline is idle.
///
/// A single discriminant rules out two stages being busy at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveStage {
    /// Idle; both the initial and the only terminal value.
    #[default]
    None,
    /// Generating the title.
    Title,
    /// Generating the description.
    Description,
    /// Generating the hashtags.
    Hashtags,
}

impl ActiveStage {
    /// Returns true if no stage is running.
    #[must_use]
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns the running stage, if any.
    #[must_use]
    pub const fn stage(self) -> Option<Stage> {
        match self {
            Self::None => None,
            Self::Title => Some(Stage::Title),
            Self::Description => Some(Stage::Description),
            Self::Hashtags => Some(Stage::Hashtags),
        }
    }
}

impl From<Stage> for ActiveStage {
    fn from(stage: Stage) -> Self {
        match stage {
            Stage::Title => Self::Title,
            Stage::Description => Self::Description,
            Stage::Hashtags => Self::Hashtags,
        }
    }
}

impl fmt::Display for ActiveStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.stage() {
            Some(stage) => stage.fmt(f),
            None => f.write_str("none"),
        }
    }
}

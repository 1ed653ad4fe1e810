//! Generation request and length preference.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Desired length category for the generated description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LengthPreference {
    /// Very long description.
    #[serde(rename = "VERY LARGE")]
    VeryLarge,
    /// Long description.
    #[default]
    #[serde(rename = "LARGE")]
    Large,
    /// Medium description.
    #[serde(rename = "MEDIUM")]
    Medium,
    /// Short description.
    #[serde(rename = "SMALL")]
    Small,
}

impl LengthPreference {
    /// All preferences, longest first.
    pub const ALL: [Self; 4] = [Self::VeryLarge, Self::Large, Self::Medium, Self::Small];

    /// Returns the label embedded in description prompts.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryLarge => "VERY LARGE",
            Self::Large => "LARGE",
            Self::Medium => "MEDIUM",
            Self::Small => "SMALL",
        }
    }
}

impl fmt::Display for LengthPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LengthPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| if c == '-' || c == '_' { ' ' } else { c.to_ascii_uppercase() })
            .collect();
        match normalized.as_str() {
            "VERY LARGE" => Ok(Self::VeryLarge),
            "LARGE" => Ok(Self::Large),
            "MEDIUM" => Ok(Self::Medium),
            "SMALL" => Ok(Self::Small),
            _ => Err(format!("unknown length preference '{}'", s.trim())),
        }
    }
}

/// Immutable input of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    idea: String,
    length: LengthPreference,
}

impl GenerationRequest {
    /// Creates a new request.
    ///
    /// The idea is not validated here; [`GenerationPipeline::run`](crate::pipeline::GenerationPipeline::run)
    /// rejects empty ideas.
    #[must_use]
    pub fn new(idea: impl Into<String>, length: LengthPreference) -> Self {
        Self {
            idea: idea.into(),
            length,
        }
    }

    /// Returns the content idea.
    #[must_use]
    pub fn idea(&self) -> &str {
        &self.idea
    }

    /// Returns the description length preference.
    #[must_use]
    pub fn length(&self) -> LengthPreference {
        self.length
    }

    /// Returns true if the idea has no visible characters.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.idea.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_labels() {
        assert_eq!(LengthPreference::VeryLarge.to_string(), "VERY LARGE");
        assert_eq!(LengthPreference::Small.label(), "SMALL");
        assert_eq!(LengthPreference::default(), LengthPreference::Large);
    }

    #[test]
    fn test_length_parse() {
        assert_eq!("very-large".parse(), Ok(LengthPreference::VeryLarge));
        assert_eq!("VERY_LARGE".parse(), Ok(LengthPreference::VeryLarge));
        assert_eq!("Very Large".parse(), Ok(LengthPreference::VeryLarge));
        assert_eq!(" medium ".parse(), Ok(LengthPreference::Medium));
        assert!("huge".parse::<LengthPreference>().is_err());
    }

    #[test]
    fn test_length_serialize() {
        let json = serde_json::to_string(&LengthPreference::VeryLarge).unwrap();
        assert_eq!(json, r#""VERY LARGE""#);
        let back: LengthPreference = serde_json::from_str(r#""SMALL""#).unwrap();
        assert_eq!(back, LengthPreference::Small);
    }

    #[test]
    fn test_request_blank() {
        assert!(GenerationRequest::new("", LengthPreference::Medium).is_blank());
        assert!(GenerationRequest::new("  \n", LengthPreference::Medium).is_blank());

        let request = GenerationRequest::new("sustainable living blog", LengthPreference::Medium);
        assert!(!request.is_blank());
        assert_eq!(request.idea(), "sustainable living blog");
        assert_eq!(request.length(), LengthPreference::Medium);
    }
}

//! Configuration for the generation service and the pipeline.
//!
//! Configuration is loaded from a JSON file (every field optional) and then
//! overridden from the environment.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::errors::NoorixError;

/// Environment variable overriding [`GeneratorConfig::model`].
pub const MODEL_ENV: &str = "NOORIX_MODEL";

/// Environment variable overriding [`GeneratorConfig::api_base_url`].
pub const API_BASE_URL_ENV: &str = "NOORIX_API_BASE_URL";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoorixConfig {
    /// Generation service settings.
    #[serde(default)]
    pub generator: GeneratorConfig,
    /// Pipeline behaviour settings.
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl NoorixConfig {
    /// Loads configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, NoorixError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Applies environment overrides using the process environment.
    #[must_use]
    pub fn apply_env(self) -> Self {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Applies environment overrides using `lookup` to read variables.
    #[must_use]
    pub fn apply_env_with<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(model) = lookup(MODEL_ENV).filter(|v| !v.trim().is_empty()) {
            self.generator.model = model;
        }
        if let Some(url) = lookup(API_BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.generator.api_base_url = url;
        }
        self
    }

    /// Checks that the configuration is usable.
    pub fn validate(&self) -> Result<(), NoorixError> {
        self.generator.validate()
    }
}

/// Configuration for the generative text service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Model identifier passed to the service.
    #[serde(default = "default_model")]
    pub model: String,
    /// Base URL of the service API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: f64,
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_api_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_api_key_env() -> String {
    "GOOGLE_API_KEY".to_string()
}

fn default_timeout() -> f64 {
    60.0
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_base_url: default_api_base_url(),
            api_key_env: default_api_key_env(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl GeneratorConfig {
    /// Creates a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the model identifier.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the API base URL.
    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Sets the timeout.
    #[must_use]
    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Gets timeout as Duration.
    ///
    /// Fails for zero, negative, non-finite or out-of-range values.
    pub fn timeout(&self) -> Result<Duration, NoorixError> {
        match Duration::try_from_secs_f64(self.timeout_seconds) {
            Ok(timeout) if !timeout.is_zero() => Ok(timeout),
            _ => Err(NoorixError::Config(format!(
                "generator.timeout_seconds must be a positive number of seconds, got {}",
                self.timeout_seconds
            ))),
        }
    }

    fn validate(&self) -> Result<(), NoorixError> {
        if self.model.trim().is_empty() {
            return Err(NoorixError::Config("generator.model must not be empty".to_string()));
        }
        if self.api_base_url.trim().is_empty() {
            return Err(NoorixError::Config(
                "generator.api_base_url must not be empty".to_string(),
            ));
        }
        self.timeout().map(|_| ())
    }
}

/// Configuration for pipeline behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Strip surrounding whitespace from service text before storing it.
    #[serde(default = "default_trim_output")]
    pub trim_output: bool,
}

fn default_trim_output() -> bool {
    true
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            trim_output: default_trim_output(),
        }
    }
}

//! Gemini `generateContent` client built on reqwest.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::TextGenerator;
use crate::config::GeneratorConfig;
use crate::errors::{GenerationError, NoorixError};
use crate::utils::truncate_chars;

const API_KEY_HEADER: &str = "x-goog-api-key";
const MAX_ERROR_BODY_CHARS: usize = 512;

/// HTTP client for the Gemini generative language API.
#[derive(Clone)]
pub struct GeminiGenerator {
    api_key: String,
    api_base_url: String,
    client: Client,
}

impl std::fmt::Debug for GeminiGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiGenerator")
            .field("api_base_url", &self.api_base_url)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl GeminiGenerator {
    /// Creates a client with an explicit API key.
    pub fn new(api_key: impl Into<String>, config: &GeneratorConfig) -> Result<Self, NoorixError> {
        let client = Client::builder().timeout(config.timeout()?).build()?;
        Ok(Self {
            api_key: api_key.into(),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Creates a client reading the API key from `config.api_key_env`.
    pub fn from_env(config: &GeneratorConfig) -> Result<Self, NoorixError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                NoorixError::Config(format!(
                    "API key not found in environment variable {}",
                    config.api_key_env
                ))
            })?;
        Self::new(api_key, config)
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{model}:generateContent", self.api_base_url)
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

impl GenerateResponse {
    fn into_text(self) -> Result<String, GenerationError> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(GenerationError::Blocked(reason));
        }
        let text: String = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();
        if text.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(text)
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, GenerationError> {
        let body = GenerateRequest {
            contents: [Content {
                parts: [RequestPart { text: prompt }],
            }],
        };

        debug!(model, prompt_chars = prompt.chars().count(), "Sending generateContent request");

        let response = self
            .client
            .post(self.endpoint(model))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Status {
                code: status.as_u16(),
                body: truncate_chars(&body, MAX_ERROR_BODY_CHARS),
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Transport(format!("invalid response body: {e}")))?;
        parsed.into_text()
    }
}

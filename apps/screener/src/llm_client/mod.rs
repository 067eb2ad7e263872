/// LLM Client — the single point of entry for all Gemini API calls in the screener.
///
/// Agents never talk HTTP themselves: they receive a `&dyn LlmBackend` and the
/// production implementation is `LlmClient`. Tests swap in a scripted backend.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[cfg(test)]
pub mod testing;

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";
/// Default model when `GEMINI_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_RETRY_BASE: Duration = Duration::from_secs(2);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("LLM failed after {attempts} attempts: {source}")]
    Exhausted {
        attempts: u32,
        #[source]
        source: Box<LlmError>,
    },
}

/// Anything that can turn a prompt into model text.
///
/// `json_mode` asks the backend to constrain output to JSON syntax. This is
/// best-effort: callers still run the response through the normalizer.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    async fn invoke(
        &self,
        prompt: &str,
        system_instruction: Option<&str>,
        json_mode: bool,
    ) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct SystemInstruction<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate, if it produced any.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// Gemini `generateContent` client with bounded retry and exponential backoff.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    max_attempts: u32,
    retry_base: Duration,
}

impl LlmClient {
    pub fn new(api_key: String, model: String) -> Result<Self, LlmError> {
        Self::with_base_url(api_key, model, GEMINI_API_URL.to_string())
    }

    /// Client pointing at a custom base URL (used by tests against a mock server).
    pub fn with_base_url(
        api_key: String,
        model: String,
        base_url: String,
    ) -> Result<Self, LlmError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(120))
            .build()?;
        Ok(Self {
            client,
            api_key,
            model,
            base_url,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_base: DEFAULT_RETRY_BASE,
        })
    }

    /// Overrides the attempt ceiling and the backoff base delay.
    pub fn with_retry(mut self, max_attempts: u32, retry_base: Duration) -> Self {
        self.max_attempts = max_attempts.max(1);
        self.retry_base = retry_base;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    /// Raw call returning the full response object.
    /// Retries network errors, 429 and 5xx; other statuses fail immediately.
    pub async fn generate(
        &self,
        prompt: &str,
        system_instruction: Option<&str>,
        json_mode: bool,
    ) -> Result<GenerateResponse, LlmError> {
        let request_body = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            system_instruction: system_instruction.map(|text| SystemInstruction {
                parts: vec![Part { text }],
            }),
            generation_config: GenerationConfig {
                response_mime_type: if json_mode {
                    "application/json"
                } else {
                    "text/plain"
                },
            },
        };
        let url = self.endpoint();

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..self.max_attempts {
            if attempt > 0 {
                let delay = backoff_delay(self.retry_base, attempt);
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<GeminiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let body = response.text().await?;
            let generated: GenerateResponse = serde_json::from_str(&body)?;

            if let Some(usage) = &generated.usage_metadata {
                debug!(
                    "LLM call succeeded: model={}, prompt_tokens={}, candidate_tokens={}",
                    self.model, usage.prompt_token_count, usage.candidates_token_count
                );
            }

            return Ok(generated);
        }

        Err(LlmError::Exhausted {
            attempts: self.max_attempts,
            source: Box::new(last_error.unwrap_or(LlmError::EmptyContent)),
        })
    }
}

/// `base * 2^(retry - 1)` for the `retry`-th retry (1-based), saturating on overflow.
fn backoff_delay(base: Duration, retry: u32) -> Duration {
    let factor = 2u32
        .checked_pow(retry.saturating_sub(1))
        .unwrap_or(u32::MAX);
    base.saturating_mul(factor)
}

#[async_trait]
impl LlmBackend for LlmClient {
    async fn invoke(
        &self,
        prompt: &str,
        system_instruction: Option<&str>,
        json_mode: bool,
    ) -> Result<String, LlmError> {
        let response = self.generate(prompt, system_instruction, json_mode).await?;
        response.text().ok_or(LlmError::EmptyContent)
    }
}

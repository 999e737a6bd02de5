use std::env;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use super::json::strip_code_fence;
use super::types::{ApiError, Content, GenerateContentRequest, GenerateContentResponse, Part};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_MODEL: &str = "gemini-2.5-flash-lite";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("GEMINI_API_KEY not set. Get one at https://aistudio.google.com/apikey")]
    ApiKeyNotSet,

    #[error("model backend disabled after a previous failure")]
    Disabled,

    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("empty response body from model")]
    EmptyResponse,

    #[error("model reply was not a JSON object: {0}")]
    MalformedReply(String),
}

/// Abstraction for the language-model backend: one prompt in, one JSON
/// object out. Implemented by `GeminiClient` for production; mock
/// implementations used in tests.
pub trait GenerateJson {
    async fn generate_json(&self, prompt: &str) -> Result<Value, LlmError>;
}

/// One-way latch that disables the backend after its first failure so a dead
/// or misconfigured backend is not retried on every resource. `reset`
/// re-closes it explicitly.
#[derive(Debug, Default)]
pub struct CircuitBreaker {
    open: AtomicBool,
}

impl CircuitBreaker {
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Relaxed)
    }

    pub fn trip(&self) {
        self.open.store(true, Ordering::Relaxed);
    }

    pub fn reset(&self) {
        self.open.store(false, Ordering::Relaxed);
    }
}

#[derive(Clone)]
struct ApiKey(String);

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    api_key: ApiKey,
    model: String,
    base_url: String,
    breaker: Arc<CircuitBreaker>,
}

impl GeminiClient {
    pub fn from_env(http: Client) -> Result<Self, LlmError> {
        let api_key = env::var("GEMINI_API_KEY").map_err(|_| LlmError::ApiKeyNotSet)?;
        if api_key.trim().is_empty() {
            return Err(LlmError::ApiKeyNotSet);
        }
        let model = env::var("GEMINI_MODEL")
            .ok()
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        Ok(Self {
            http,
            api_key: ApiKey(api_key.trim().to_string()),
            model,
            base_url: API_BASE.to_string(),
            breaker: Arc::new(CircuitBreaker::default()),
        })
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(http: Client, base_url: &str) -> Self {
        Self {
            http,
            api_key: ApiKey("test-key".to_string()),
            model: DEFAULT_MODEL.to_string(),
            base_url: base_url.to_string(),
            breaker: Arc::new(CircuitBreaker::default()),
        }
    }

    /// Re-enable the backend after a trip.
    pub fn reset(&self) {
        self.breaker.reset();
    }

    async fn request_json(&self, prompt: &str) -> Result<Value, LlmError> {
        let url = format!("{}/{}:generateContent", self.base_url, self.model);

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
                role: None,
            }],
        };

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key.0)
            .header("User-Agent", crate::USER_AGENT)
            .json(&request)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            if let Ok(body) = serde_json::from_str::<GenerateContentResponse>(&text)
                && let Some(err) = &body.error
            {
                return Err(classify_api_error(err));
            }
            let snippet = crate::text::truncate_chars(&text, 200);
            return Err(LlmError::Api {
                code: status.as_u16(),
                message: format!("HTTP {status}: {snippet}"),
            });
        }

        let body: GenerateContentResponse = response.json().await?;
        if let Some(err) = &body.error {
            return Err(classify_api_error(err));
        }

        let raw_text = reply_text(&body);
        if raw_text.is_empty() {
            return Err(LlmError::EmptyResponse);
        }

        let cleaned = strip_code_fence(&raw_text);
        let value: Value = serde_json::from_str(cleaned)
            .map_err(|e| LlmError::MalformedReply(e.to_string()))?;
        if !value.is_object() {
            return Err(LlmError::MalformedReply(format!(
                "expected an object, got {cleaned}"
            )));
        }

        debug!(model = %self.model, "model reply parsed");
        Ok(value)
    }
}

impl GenerateJson for GeminiClient {
    async fn generate_json(&self, prompt: &str) -> Result<Value, LlmError> {
        if self.breaker.is_open() {
            return Err(LlmError::Disabled);
        }

        match self.request_json(prompt).await {
            Ok(value) => Ok(value),
            Err(e) => {
                self.breaker.trip();
                warn!(error = %e, "model call failed, disabling backend");
                Err(e)
            }
        }
    }
}

/// All text parts of the first candidate, joined with newlines.
fn reply_text(body: &GenerateContentResponse) -> String {
    body.candidates
        .as_ref()
        .and_then(|c| c.first())
        .and_then(|c| c.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .map(|part| part.text.as_str())
                .filter(|text| !text.is_empty())
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_default()
}

fn classify_api_error(err: &ApiError) -> LlmError {
    LlmError::Api {
        code: err.code.unwrap_or(0),
        message: err
            .message
            .clone()
            .unwrap_or_else(|| "Unknown error".to_string()),
    }
}

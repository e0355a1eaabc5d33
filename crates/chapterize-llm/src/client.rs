use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde_json::{json, Value};
use tracing::instrument;

use chapterize_core::{ApiKey, LlmError};

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// A single-turn request against the messages API.
#[derive(Clone, Debug, Default)]
pub struct CompletionRequest {
    pub prompt: String,
    /// Assistant prefill; the reply continues from here. The prefill itself
    /// is not echoed back, so callers that need it must re-prepend it.
    pub prefill: Option<String>,
    pub stop_sequences: Vec<String>,
    pub max_tokens: u32,
}

/// Seam between pipelines and the HTTP client, so tests run against a
/// scripted completer instead of the network.
#[async_trait]
pub trait Completer: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError>;
}

/// Non-streaming Anthropic messages-API client. One instance per run,
/// passed in explicitly; there is no process-wide client.
pub struct AnthropicClient {
    client: Client,
    api_key: ApiKey,
    model: String,
}

impl AnthropicClient {
    pub fn new(api_key: ApiKey, model: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .connect_timeout(CONNECT_TIMEOUT)
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("failed to build HTTP client"),
            api_key,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Completer for AnthropicClient {
    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let body = build_request_body(request, &self.model);

        let resp = self
            .client
            .post(API_URL)
            .header("x-api-key", self.api_key.0.expose_secret())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("accept", "application/json")
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout(REQUEST_TIMEOUT)
                } else {
                    LlmError::Network(e.to_string())
                }
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(LlmError::from_status(status, body));
        }

        let value: Value = resp
            .json()
            .await
            .map_err(|e| LlmError::Network(e.to_string()))?;
        extract_text(&value)
    }
}

/// Build the messages-API request body. Pure so tests can assert on the
/// exact wire shape without a network.
pub fn build_request_body(request: &CompletionRequest, model: &str) -> Value {
    let mut messages = vec![json!({"role": "user", "content": request.prompt})];
    if let Some(prefill) = &request.prefill {
        messages.push(json!({"role": "assistant", "content": prefill}));
    }

    let mut body = json!({
        "model": model,
        "max_tokens": request.max_tokens,
        "messages": messages,
    });
    if !request.stop_sequences.is_empty() {
        body["stop_sequences"] = json!(request.stop_sequences);
    }
    body
}

/// Pull the concatenated text blocks out of a messages-API response.
fn extract_text(value: &Value) -> Result<String, LlmError> {
    let blocks = value
        .get("content")
        .and_then(Value::as_array)
        .ok_or_else(|| LlmError::MalformedResponse("response has no content array".into()))?;

    let text: String = blocks
        .iter()
        .filter(|b| b.get("type").and_then(Value::as_str) == Some("text"))
        .filter_map(|b| b.get("text").and_then(Value::as_str))
        .collect();

    if text.is_empty() {
        return Err(LlmError::MalformedResponse(
            "response contained no text blocks".into(),
        ));
    }
    Ok(text)
}

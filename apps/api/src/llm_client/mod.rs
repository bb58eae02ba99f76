/// LLM Client — the only place in Briefly that talks to provider HTTP APIs.
///
/// Each provider is a `GenerationBackend`. Callers hand over a composed prompt,
/// the raw notes, a JSON schema and sampling parameters, and get back a parsed
/// JSON value. A single attempt is made per call; there is no retry here.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

use crate::models::settings::Provider;

pub mod gemini;
pub mod openai;
pub mod prompts;

#[cfg(test)]
pub mod mock;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed response envelope: {0}")]
    Envelope(#[from] serde_json::Error),
}

/// Sampling parameters forwarded to the provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampling {
    pub temperature: f64,
    pub top_p: Option<f64>,
}

/// Everything a backend needs for one generation call.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    pub prompt: &'a str,
    pub input: &'a str,
    pub schema: &'a Value,
    pub sampling: Sampling,
}

/// One remote generation backend.
///
/// Implementations return the parsed JSON object produced by the model.
/// Empty or malformed model content comes back as an empty object, not an error.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    fn provider(&self) -> Provider;

    async fn generate(
        &self,
        api_key: &str,
        request: &GenerationRequest<'_>,
    ) -> Result<Value, LlmError>;
}

/// Shared reqwest client for all backends.
pub fn http_client() -> Result<Client, LlmError> {
    Ok(Client::builder().timeout(REQUEST_TIMEOUT).build()?)
}

/// Reads a non-success response into an `LlmError::Api` carrying the body text.
pub(crate) async fn api_error(response: reqwest::Response) -> LlmError {
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    LlmError::Api { status, message }
}

/// Parses model output into a JSON object, leniently.
///
/// Missing or empty content, invalid JSON and non-object JSON all become `{}`.
pub fn parse_object_lenient(content: Option<&str>) -> Value {
    let text = strip_json_fences(content.unwrap_or_default());
    if text.is_empty() {
        return Value::Object(Map::new());
    }

    match serde_json::from_str::<Value>(text) {
        Ok(value @ Value::Object(_)) => value,
        Ok(other) => {
            warn!("Model returned non-object JSON ({}), treating as empty", kind(&other));
            Value::Object(Map::new())
        }
        Err(e) => {
            warn!("Model returned malformed JSON, treating as empty: {e}");
            Value::Object(Map::new())
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

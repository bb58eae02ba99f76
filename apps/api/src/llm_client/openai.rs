//! Instruction-based backend: OpenAI chat completions in JSON mode.
//!
//! The chat API has no native schema constraint here, so the schema is
//! rendered into the system message.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::llm_client::prompts::{JSON_STRUCTURE_INSTRUCTION, RAW_NOTES_PREFIX};
use crate::llm_client::{
    api_error, parse_object_lenient, GenerationBackend, GenerationRequest, LlmError,
};
use crate::models::settings::Provider;

const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";
/// Hardcoded so every deployment generates with the same model.
pub const MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: &'static str,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl ChatResponse {
    fn content(&self) -> Option<&str> {
        self.choices.first()?.message.as_ref()?.content.as_deref()
    }
}

fn system_message(prompt: &str, schema: &Value) -> Result<String, LlmError> {
    let rendered = serde_json::to_string_pretty(schema)?;
    Ok(format!("{prompt}\n\n{JSON_STRUCTURE_INSTRUCTION}\n{rendered}"))
}

fn build_request(request: &GenerationRequest<'_>) -> Result<ChatRequest, LlmError> {
    Ok(ChatRequest {
        model: MODEL,
        messages: vec![
            ChatMessage {
                role: "system",
                content: system_message(request.prompt, request.schema)?,
            },
            ChatMessage {
                role: "user",
                content: format!("{RAW_NOTES_PREFIX}{}", request.input),
            },
        ],
        response_format: ResponseFormat {
            kind: "json_object",
        },
        // JSON mode requests only forward temperature.
        temperature: request.sampling.temperature,
    })
}

pub struct OpenAiBackend {
    client: Client,
}

impl OpenAiBackend {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl GenerationBackend for OpenAiBackend {
    fn provider(&self) -> Provider {
        Provider::Openai
    }

    async fn generate(
        &self,
        api_key: &str,
        request: &GenerationRequest<'_>,
    ) -> Result<Value, LlmError> {
        let body = build_request(request)?;

        let response = self
            .client
            .post(OPENAI_CHAT_URL)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let text = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&text)?;
        debug!("OpenAI call succeeded: {} choice(s)", parsed.choices.len());

        Ok(parse_object_lenient(parsed.content()))
    }
}

//! Schema-native backend: Gemini `generateContent` with `responseSchema`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::llm_client::prompts::RAW_NOTES_PREFIX;
use crate::llm_client::{
    api_error, parse_object_lenient, GenerationBackend, GenerationRequest, LlmError,
};
use crate::models::settings::Provider;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Hardcoded so every deployment generates with the same model.
pub const MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    role: &'static str,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a Value,
    temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GeminiResponse {
    /// Concatenated text of the first candidate, if any.
    fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        (!text.is_empty()).then_some(text)
    }
}

fn build_request<'a>(request: &GenerationRequest<'a>) -> GeminiRequest<'a> {
    GeminiRequest {
        contents: vec![GeminiContent {
            role: "user",
            parts: vec![GeminiPart {
                text: format!("{}\n\n{}{}", request.prompt, RAW_NOTES_PREFIX, request.input),
            }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json",
            response_schema: request.schema,
            temperature: request.sampling.temperature,
            top_p: request.sampling.top_p,
        },
    }
}

pub struct GeminiBackend {
    client: Client,
}

impl GeminiBackend {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl GenerationBackend for GeminiBackend {
    fn provider(&self) -> Provider {
        Provider::Gemini
    }

    async fn generate(
        &self,
        api_key: &str,
        request: &GenerationRequest<'_>,
    ) -> Result<Value, LlmError> {
        let url = format!("{GEMINI_API_BASE}/models/{MODEL}:generateContent");

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", api_key)
            .json(&build_request(request))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let body = response.text().await?;
        let parsed: GeminiResponse = serde_json::from_str(&body)?;
        debug!("Gemini call succeeded: {} candidate(s)", parsed.candidates.len());

        Ok(parse_object_lenient(parsed.text().as_deref()))
    }
}

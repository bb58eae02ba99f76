//! Generation dispatch: routes a composed prompt to the selected provider
//! backend and normalizes the result into a `Document`.
//!
//! Flow: resolve key → compose → backend.generate → payload from JSON →
//!       merge request metadata.
//!
//! One attempt per call. Failures surface to the caller unchanged.

use std::sync::Arc;

use chrono::{SubsecRound, Utc};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::composer::compose;
use crate::llm_client::{GenerationBackend, GenerationRequest};
use crate::models::document::{Document, DocumentPayload, Mode, Platform, Tone};
use crate::models::portfolio::Portfolio;
use crate::models::settings::Provider;

/// Inputs for one generation call.
#[derive(Debug, Clone, Copy)]
pub struct GenerateParams<'a> {
    pub input: &'a str,
    pub platform: Platform,
    pub mode: Mode,
    pub prompt_override: Option<&'a str>,
    pub provider: Provider,
    pub api_key: Option<&'a str>,
    pub tone: Tone,
    pub portfolios: &'a [Portfolio],
}

/// Holds one backend per provider.
#[derive(Clone)]
pub struct Dispatcher {
    gemini: Arc<dyn GenerationBackend>,
    openai: Arc<dyn GenerationBackend>,
    gemini_fallback_key: Option<String>,
}

impl Dispatcher {
    pub fn new(gemini: Arc<dyn GenerationBackend>, openai: Arc<dyn GenerationBackend>) -> Self {
        Self {
            gemini,
            openai,
            gemini_fallback_key: None,
        }
    }

    /// Server-side key used for Gemini when the user has not stored one.
    pub fn with_gemini_fallback_key(mut self, key: Option<String>) -> Self {
        self.gemini_fallback_key = key.filter(|k| !k.trim().is_empty());
        self
    }

    fn backend(&self, provider: Provider) -> &dyn GenerationBackend {
        match provider {
            Provider::Openai => self.openai.as_ref(),
            Provider::Gemini => self.gemini.as_ref(),
        }
    }

    fn resolve_key<'a>(&'a self, provider: Provider, key: Option<&'a str>) -> Option<&'a str> {
        key.map(str::trim)
            .filter(|k| !k.is_empty())
            .or(match provider {
                Provider::Gemini => self.gemini_fallback_key.as_deref(),
                Provider::Openai => None,
            })
    }

    /// Generates one document. Fails with `MissingApiKey` before any network
    /// call when no key is available for the selected provider.
    pub async fn generate(&self, params: GenerateParams<'_>) -> Result<Document, AppError> {
        let api_key = self
            .resolve_key(params.provider, params.api_key)
            .ok_or(AppError::MissingApiKey(params.provider))?;

        let composed = compose(
            params.mode,
            params.platform,
            params.tone,
            params.portfolios,
            params.prompt_override,
        );

        let request = GenerationRequest {
            prompt: &composed.prompt,
            input: params.input,
            schema: composed.schema.schema(),
            sampling: composed.sampling,
        };

        let backend = self.backend(params.provider);
        info!(
            "Generating {} for {:?} via {}",
            params.mode.as_str(),
            params.platform,
            backend.provider().as_str()
        );

        let value = backend
            .generate(api_key, &request)
            .await
            .map_err(|e| {
                AppError::Llm(format!("{} generation failed: {e}", params.provider.as_str()))
            })?;

        Ok(Document {
            id: Uuid::new_v4(),
            platform: params.platform,
            created_at: Utc::now().trunc_subsecs(3),
            original_input: params.input.to_string(),
            tone: Some(params.tone),
            included_portfolios: params.portfolios.to_vec(),
            payload: DocumentPayload::from_generated(params.mode, value),
        })
    }
}

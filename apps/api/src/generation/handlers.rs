//! Axum route handlers for generation.
//!
//! Settings are snapshotted under the workspace lock, the lock is released for
//! the provider call, and the result is recorded under a fresh lock.

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::dispatcher::GenerateParams;
use crate::models::document::{Document, Mode, Platform, Tone};
use crate::models::settings::Provider;
use crate::state::AppState;
use crate::workspace::Workspace;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub input: String,
    pub platform: Platform,
    pub mode: Mode,
    #[serde(default)]
    pub tone: Tone,
    #[serde(default)]
    pub portfolio_ids: Vec<Uuid>,
}

/// Provider settings captured at the start of a generation.
struct ProviderSnapshot {
    provider: Provider,
    api_key: Option<String>,
    prompt_override: Option<String>,
}

impl ProviderSnapshot {
    fn capture(workspace: &Workspace, platform: Platform, mode: Mode) -> Self {
        let config = workspace.api_config();
        Self {
            provider: config.provider,
            api_key: config.key_for(config.provider).map(str::to_string),
            prompt_override: workspace
                .prompts()
                .override_for(platform, mode)
                .map(str::to_string),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/documents/generate
///
/// Generates a document from raw notes, stores it at the front of history and
/// selects it.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<Document>, AppError> {
    if request.input.trim().is_empty() {
        return Err(AppError::Validation("input cannot be empty".to_string()));
    }

    let _permit = state.generation_gate.try_acquire()?;

    let (snapshot, portfolios) = {
        let workspace = state.workspace.lock().await;
        (
            ProviderSnapshot::capture(&workspace, request.platform, request.mode),
            workspace.selected_portfolios(&request.portfolio_ids),
        )
    };

    let document = state
        .dispatcher
        .generate(GenerateParams {
            input: &request.input,
            platform: request.platform,
            mode: request.mode,
            prompt_override: snapshot.prompt_override.as_deref(),
            provider: snapshot.provider,
            api_key: snapshot.api_key.as_deref(),
            tone: request.tone,
            portfolios: &portfolios,
        })
        .await?;

    state.workspace.lock().await.record(document.clone()).await?;
    info!(
        "Recorded {} document {} \"{}\"",
        document.mode().as_str(),
        document.id,
        document.title()
    );

    Ok(Json(document))
}

/// POST /api/v1/documents/current/regenerate
///
/// Re-runs generation for the current document with its original input, tone
/// and portfolio copies, using today's provider settings. The new document
/// takes over the old one's history slot, or goes to the front of history if
/// the old one was deleted while the call was running.
pub async fn handle_regenerate(State(state): State<AppState>) -> Result<Json<Document>, AppError> {
    let _permit = state.generation_gate.try_acquire()?;

    let (current, snapshot) = {
        let workspace = state.workspace.lock().await;
        let current = workspace
            .history()
            .current()
            .cloned()
            .ok_or_else(|| AppError::NotFound("No document is selected".to_string()))?;
        let snapshot = ProviderSnapshot::capture(&workspace, current.platform, current.mode());
        (current, snapshot)
    };

    let document = state
        .dispatcher
        .generate(GenerateParams {
            input: &current.original_input,
            platform: current.platform,
            mode: current.mode(),
            prompt_override: snapshot.prompt_override.as_deref(),
            provider: snapshot.provider,
            api_key: snapshot.api_key.as_deref(),
            tone: current.tone.unwrap_or_default(),
            portfolios: &current.included_portfolios,
        })
        .await?;

    state
        .workspace
        .lock()
        .await
        .replace(current.id, document.clone())
        .await?;
    info!("Regenerated document {} as {}", current.id, document.id);

    Ok(Json(document))
}

//! Axum route handlers for history, settings and portfolios.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::prompts::default_template;
use crate::models::document::{Document, DocumentEdit};
use crate::models::portfolio::Portfolio;
use crate::models::settings::{
    ApiConfigUpdate, ApiConfigView, PromptCategory, PromptConfig, Provider, Theme,
};
use crate::state::AppState;
use crate::workspace::export::render_plain_text;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct PromptView {
    pub category: PromptCategory,
    pub template: String,
    pub custom: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ThemeBody {
    pub theme: Theme,
}

/// A portfolio as submitted by the settings screen. New entries have no id yet.
#[derive(Debug, Deserialize)]
pub struct PortfolioInput {
    pub id: Option<Uuid>,
    pub name: String,
    pub url: String,
}

fn prompt_view(prompts: &PromptConfig, category: PromptCategory) -> PromptView {
    let custom = prompts.custom(category);
    PromptView {
        category,
        template: custom.unwrap_or(default_template(category)).to_string(),
        custom: custom.is_some(),
    }
}

fn prompt_views(prompts: &PromptConfig) -> Vec<PromptView> {
    PromptCategory::ALL
        .iter()
        .map(|&category| prompt_view(prompts, category))
        .collect()
}

fn normalize_portfolios(inputs: Vec<PortfolioInput>) -> Result<Vec<Portfolio>, AppError> {
    inputs
        .into_iter()
        .map(|input| {
            let name = input.name.trim();
            let url = input.url.trim();
            if name.is_empty() || url.is_empty() {
                return Err(AppError::Validation(
                    "portfolio name and url are required".to_string(),
                ));
            }
            Ok(Portfolio {
                id: input.id.unwrap_or_else(Uuid::new_v4),
                name: name.to_string(),
                url: url.to_string(),
            })
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// History
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/documents
pub async fn handle_list_documents(State(state): State<AppState>) -> Json<Vec<Document>> {
    let workspace = state.workspace.lock().await;
    Json(workspace.history().documents().to_vec())
}

/// DELETE /api/v1/documents/:id
pub async fn handle_delete_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.workspace.lock().await.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/documents/:id/select
pub async fn handle_select_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Document>, AppError> {
    let document = state.workspace.lock().await.select(id)?;
    Ok(Json(document))
}

/// GET /api/v1/documents/current
pub async fn handle_get_current(State(state): State<AppState>) -> Json<Option<Document>> {
    let workspace = state.workspace.lock().await;
    Json(workspace.history().current().cloned())
}

/// DELETE /api/v1/documents/current
///
/// Clears the selection ("new task"). The document stays in history.
pub async fn handle_clear_current(State(state): State<AppState>) -> StatusCode {
    state.workspace.lock().await.clear_selection();
    StatusCode::NO_CONTENT
}

/// PATCH /api/v1/documents/current
pub async fn handle_edit_current(
    State(state): State<AppState>,
    Json(edit): Json<DocumentEdit>,
) -> Result<Json<Document>, AppError> {
    let document = state.workspace.lock().await.edit_current(edit).await?;
    Ok(Json(document))
}

/// GET /api/v1/documents/current/text
pub async fn handle_current_text(State(state): State<AppState>) -> Result<String, AppError> {
    let workspace = state.workspace.lock().await;
    let document = workspace
        .history()
        .current()
        .ok_or_else(|| AppError::NotFound("No document is selected".to_string()))?;
    Ok(render_plain_text(document))
}

// ────────────────────────────────────────────────────────────────────────────
// Settings
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/settings/prompts
pub async fn handle_get_prompts(State(state): State<AppState>) -> Json<Vec<PromptView>> {
    let workspace = state.workspace.lock().await;
    Json(prompt_views(workspace.prompts()))
}

/// PUT /api/v1/settings/prompts
pub async fn handle_put_prompts(
    State(state): State<AppState>,
    Json(prompts): Json<PromptConfig>,
) -> Result<Json<Vec<PromptView>>, AppError> {
    let mut workspace = state.workspace.lock().await;
    workspace.save_prompts(prompts).await?;
    Ok(Json(prompt_views(workspace.prompts())))
}

/// POST /api/v1/settings/prompts/:category/reset
pub async fn handle_reset_prompt(
    State(state): State<AppState>,
    Path(category): Path<PromptCategory>,
) -> Result<Json<PromptView>, AppError> {
    let mut workspace = state.workspace.lock().await;
    workspace.reset_prompt(category).await?;
    Ok(Json(prompt_view(workspace.prompts(), category)))
}

/// GET /api/v1/settings/api
pub async fn handle_get_api_config(State(state): State<AppState>) -> Json<ApiConfigView> {
    Json(state.workspace.lock().await.api_config().view())
}

/// PUT /api/v1/settings/api
///
/// Partial update: a missing or blank key leaves the stored key in place.
pub async fn handle_put_api_config(
    State(state): State<AppState>,
    Json(update): Json<ApiConfigUpdate>,
) -> Result<Json<ApiConfigView>, AppError> {
    let mut workspace = state.workspace.lock().await;
    workspace.update_api_config(update).await?;
    Ok(Json(workspace.api_config().view()))
}

/// DELETE /api/v1/settings/api/keys/:provider
pub async fn handle_clear_api_key(
    State(state): State<AppState>,
    Path(provider): Path<Provider>,
) -> Result<Json<ApiConfigView>, AppError> {
    let mut workspace = state.workspace.lock().await;
    workspace.clear_api_key(provider).await?;
    Ok(Json(workspace.api_config().view()))
}

/// GET /api/v1/settings/theme
pub async fn handle_get_theme(State(state): State<AppState>) -> Json<ThemeBody> {
    let theme = state.workspace.lock().await.theme();
    Json(ThemeBody { theme })
}

/// PUT /api/v1/settings/theme
pub async fn handle_put_theme(
    State(state): State<AppState>,
    Json(body): Json<ThemeBody>,
) -> Result<Json<ThemeBody>, AppError> {
    state.workspace.lock().await.set_theme(body.theme).await?;
    Ok(Json(body))
}

// ────────────────────────────────────────────────────────────────────────────
// Portfolios
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/portfolios
pub async fn handle_get_portfolios(State(state): State<AppState>) -> Json<Vec<Portfolio>> {
    Json(state.workspace.lock().await.portfolios().to_vec())
}

/// PUT /api/v1/portfolios
///
/// Replaces the whole list. Entries without an id get a new one.
pub async fn handle_put_portfolios(
    State(state): State<AppState>,
    Json(inputs): Json<Vec<PortfolioInput>>,
) -> Result<Json<Vec<Portfolio>>, AppError> {
    let portfolios = normalize_portfolios(inputs)?;
    let mut workspace = state.workspace.lock().await;
    workspace.save_portfolios(portfolios).await?;
    Ok(Json(workspace.portfolios().to_vec()))
}

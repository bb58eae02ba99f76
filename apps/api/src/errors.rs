use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::settings::Provider;
use crate::store::StoreError;
use crate::workspace::history::HistoryError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No API key configured for {}", .0.as_str())]
    MissingApiKey(Provider),

    #[error("A generation is already in progress")]
    Busy,

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl From<HistoryError> for AppError {
    fn from(e: HistoryError) -> Self {
        match e {
            HistoryError::NotFound(_) | HistoryError::NoSelection => {
                AppError::NotFound(e.to_string())
            }
            HistoryError::Edit(edit) => AppError::Validation(edit.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::MissingApiKey(provider) => (
                StatusCode::BAD_REQUEST,
                "MISSING_API_KEY",
                format!(
                    "{} API key is required. Add it in settings.",
                    provider.as_str()
                ),
            ),
            AppError::Busy => (
                StatusCode::CONFLICT,
                "GENERATION_IN_PROGRESS",
                "A generation is already running".to_string(),
            ),
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_ERROR",
                    "Generation failed. Please check your API key and Internet connection."
                        .to_string(),
                )
            }
            AppError::Store(e) => {
                tracing::error!("Store error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORE_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::generation::handlers as generation;
use crate::state::AppState;
use crate::workspace::handlers as workspace;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Documents
        .route(
            "/api/v1/documents",
            get(workspace::handle_list_documents),
        )
        .route(
            "/api/v1/documents/generate",
            post(generation::handle_generate),
        )
        .route(
            "/api/v1/documents/current",
            get(workspace::handle_get_current)
                .patch(workspace::handle_edit_current)
                .delete(workspace::handle_clear_current),
        )
        .route(
            "/api/v1/documents/current/regenerate",
            post(generation::handle_regenerate),
        )
        .route(
            "/api/v1/documents/current/text",
            get(workspace::handle_current_text),
        )
        .route(
            "/api/v1/documents/:id",
            delete(workspace::handle_delete_document),
        )
        .route(
            "/api/v1/documents/:id/select",
            post(workspace::handle_select_document),
        )
        // Settings
        .route(
            "/api/v1/settings/prompts",
            get(workspace::handle_get_prompts).put(workspace::handle_put_prompts),
        )
        .route(
            "/api/v1/settings/prompts/:category/reset",
            post(workspace::handle_reset_prompt),
        )
        .route(
            "/api/v1/settings/api",
            get(workspace::handle_get_api_config).put(workspace::handle_put_api_config),
        )
        .route(
            "/api/v1/settings/api/keys/:provider",
            delete(workspace::handle_clear_api_key),
        )
        .route(
            "/api/v1/settings/theme",
            get(workspace::handle_get_theme).put(workspace::handle_put_theme),
        )
        // Portfolios
        .route(
            "/api/v1/portfolios",
            get(workspace::handle_get_portfolios).put(workspace::handle_put_portfolios),
        )
        .with_state(state)
}

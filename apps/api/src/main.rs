mod config;
mod errors;
mod generation;
mod llm_client;
mod models;
mod routes;
mod state;
mod store;
mod workspace;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::generation::dispatcher::Dispatcher;
use crate::llm_client::{gemini::GeminiBackend, openai::OpenAiBackend};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{memory::MemoryStore, redis_store::RedisStore, KvStore};
use crate::workspace::Workspace;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Briefly API v{}", env!("CARGO_PKG_VERSION"));

    // Key-value store: Redis when configured, otherwise process memory
    let store: Arc<dyn KvStore> = match &config.redis_url {
        Some(url) => Arc::new(RedisStore::connect(url, &config.store_namespace).await?),
        None => {
            info!("REDIS_URL not set; workspace will not survive a restart");
            Arc::new(MemoryStore::new())
        }
    };

    let workspace = Workspace::load(store).await?;

    // Initialize generation backends
    let http = llm_client::http_client()?;
    let dispatcher = Dispatcher::new(
        Arc::new(GeminiBackend::new(http.clone())),
        Arc::new(OpenAiBackend::new(http)),
    )
    .with_gemini_fallback_key(config.gemini_api_key.clone());
    info!(
        "Generation backends initialized (gemini: {}, openai: {})",
        llm_client::gemini::MODEL,
        llm_client::openai::MODEL
    );

    let state = AppState::new(workspace, dispatcher);

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

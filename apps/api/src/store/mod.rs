//! Key-value persistence for workspace state.
//!
//! Values are JSON strings under fixed keys. Backends only move strings; the
//! JSON helpers below do the encoding.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::warn;

pub mod memory;
pub mod redis_store;

pub const HISTORY_KEY: &str = "briefly_history";
pub const PROMPTS_KEY: &str = "briefly_prompts";
pub const API_CONFIG_KEY: &str = "briefly_api_config";
pub const PORTFOLIOS_KEY: &str = "briefly_portfolios";
pub const THEME_KEY: &str = "briefly_theme";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError>;
}

/// Loads and decodes a JSON value.
///
/// A blob that no longer decodes is logged and reported as absent, so callers
/// fall back to their defaults instead of refusing to start.
pub async fn load_json<T: DeserializeOwned>(
    store: &dyn KvStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    let Some(raw) = store.get(key).await? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!("Discarding unreadable value under '{key}': {e}");
            Ok(None)
        }
    }
}

pub async fn save_json<T: Serialize + ?Sized>(
    store: &dyn KvStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    store.set(key, serde_json::to_string(value)?).await
}

//! The single user session's state and its persistence.
//!
//! Holds history, prompt overrides, provider credentials, portfolios and the
//! theme. Every mutation is written back to the key-value store before the
//! method returns. The current selection is session-only and never persisted.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::document::{Document, DocumentEdit};
use crate::models::portfolio::Portfolio;
use crate::models::settings::{
    ApiConfig, ApiConfigUpdate, PromptCategory, PromptConfig, Provider, Theme,
};
use crate::store::{
    load_json, save_json, KvStore, StoreError, API_CONFIG_KEY, HISTORY_KEY, PORTFOLIOS_KEY,
    PROMPTS_KEY, THEME_KEY,
};

pub mod export;
pub mod handlers;
pub mod history;

use history::{History, HistoryError};

pub struct Workspace {
    store: Arc<dyn KvStore>,
    history: History,
    prompts: PromptConfig,
    api_config: ApiConfig,
    portfolios: Vec<Portfolio>,
    theme: Theme,
}

impl Workspace {
    /// Restores persisted state, falling back to defaults for absent keys.
    pub async fn load(store: Arc<dyn KvStore>) -> Result<Self, StoreError> {
        let documents: Vec<Document> = load_json(store.as_ref(), HISTORY_KEY)
            .await?
            .unwrap_or_default();
        let prompts = load_json(store.as_ref(), PROMPTS_KEY)
            .await?
            .unwrap_or_default();
        let api_config = load_json(store.as_ref(), API_CONFIG_KEY)
            .await?
            .unwrap_or_default();
        let portfolios = load_json(store.as_ref(), PORTFOLIOS_KEY)
            .await?
            .unwrap_or_default();
        let theme = load_json(store.as_ref(), THEME_KEY)
            .await?
            .unwrap_or_default();

        info!("Workspace loaded: {} document(s) in history", documents.len());

        Ok(Self {
            store,
            history: History::new(documents),
            prompts,
            api_config,
            portfolios,
            theme,
        })
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn prompts(&self) -> &PromptConfig {
        &self.prompts
    }

    pub fn api_config(&self) -> &ApiConfig {
        &self.api_config
    }

    pub fn portfolios(&self) -> &[Portfolio] {
        &self.portfolios
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Portfolios whose id is in `ids`, in portfolio-list order.
    pub fn selected_portfolios(&self, ids: &[Uuid]) -> Vec<Portfolio> {
        self.portfolios
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect()
    }

    /// Applies `change` to a copy of the history and swaps it in only after
    /// the copy has been written, so a failed write leaves memory untouched.
    async fn commit_history<T>(
        &mut self,
        change: impl FnOnce(&mut History) -> Result<T, HistoryError>,
    ) -> Result<T, AppError> {
        let mut next = self.history.clone();
        let outcome = change(&mut next)?;
        save_json(self.store.as_ref(), HISTORY_KEY, next.documents()).await?;
        self.history = next;
        Ok(outcome)
    }

    /// Stores a newly generated document at the front of history and selects it.
    pub async fn record(&mut self, document: Document) -> Result<(), AppError> {
        self.commit_history(|history| {
            history.insert(document);
            Ok(())
        })
        .await
    }

    /// Swaps a regenerated document into the slot of `id`. If that entry was
    /// deleted in the meantime the document is recorded as new instead.
    pub async fn replace(&mut self, id: Uuid, document: Document) -> Result<(), AppError> {
        self.commit_history(|history| {
            if history.get(id).is_some() {
                history.replace(id, document)
            } else {
                warn!(
                    "Document {id} was removed during regeneration; recording {} as new",
                    document.id
                );
                history.insert(document);
                Ok(())
            }
        })
        .await
    }

    pub fn select(&mut self, id: Uuid) -> Result<Document, AppError> {
        Ok(self.history.select(id)?.clone())
    }

    pub fn clear_selection(&mut self) {
        self.history.clear_selection();
    }

    pub async fn edit_current(&mut self, edit: DocumentEdit) -> Result<Document, AppError> {
        self.commit_history(|history| history.edit_current(edit).map(Document::clone))
            .await
    }

    pub async fn delete(&mut self, id: Uuid) -> Result<Document, AppError> {
        self.commit_history(|history| history.remove(id)).await
    }

    pub async fn save_prompts(&mut self, prompts: PromptConfig) -> Result<(), AppError> {
        save_json(self.store.as_ref(), PROMPTS_KEY, &prompts).await?;
        self.prompts = prompts;
        Ok(())
    }

    pub async fn reset_prompt(&mut self, category: PromptCategory) -> Result<(), AppError> {
        let mut prompts = self.prompts.clone();
        prompts.reset(category);
        self.save_prompts(prompts).await
    }

    pub async fn save_api_config(&mut self, config: ApiConfig) -> Result<(), AppError> {
        save_json(self.store.as_ref(), API_CONFIG_KEY, &config).await?;
        self.api_config = config;
        Ok(())
    }

    /// Merges a partial update; keys it leaves out or blank are kept.
    pub async fn update_api_config(&mut self, update: ApiConfigUpdate) -> Result<(), AppError> {
        let mut config = self.api_config.clone();
        config.apply(update);
        self.save_api_config(config).await
    }

    pub async fn clear_api_key(&mut self, provider: Provider) -> Result<(), AppError> {
        let mut config = self.api_config.clone();
        config.clear_key(provider);
        self.save_api_config(config).await
    }

    pub async fn save_portfolios(&mut self, portfolios: Vec<Portfolio>) -> Result<(), AppError> {
        save_json(self.store.as_ref(), PORTFOLIOS_KEY, &portfolios).await?;
        self.portfolios = portfolios;
        Ok(())
    }

    pub async fn set_theme(&mut self, theme: Theme) -> Result<(), AppError> {
        save_json(self.store.as_ref(), THEME_KEY, &theme).await?;
        self.theme = theme;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::document::{DocumentPayload, Platform, ProposalDraft, Tone};
    use crate::models::settings::ProviderKeys;
    use crate::store::memory::MemoryStore;
    use async_trait::async_trait;
    use chrono::{SubsecRound, Utc};
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Memory store whose writes can be switched off.
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        offline: AtomicBool,
    }

    #[async_trait]
    impl KvStore for FlakyStore {
        async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
            if self.offline.load(Ordering::SeqCst) {
                let offline = redis::RedisError::from((redis::ErrorKind::IoError, "store offline"));
                return Err(offline.into());
            }
            self.inner.set(key, value).await
        }
    }

    fn proposal(title: &str) -> Document {
        Document {
            id: Uuid::new_v4(),
            platform: Platform::Email,
            created_at: Utc::now().trunc_subsecs(3),
            original_input: "notes".to_string(),
            tone: Some(Tone::Formal),
            included_portfolios: vec![],
            payload: DocumentPayload::Proposal(ProposalDraft {
                title: title.to_string(),
                ..Default::default()
            }),
        }
    }

    async fn empty_workspace() -> (Arc<MemoryStore>, Workspace) {
        let store = Arc::new(MemoryStore::new());
        let workspace = Workspace::load(store.clone()).await.unwrap();
        (store, workspace)
    }

    #[tokio::test]
    async fn test_load_defaults_from_empty_store() {
        let (_, workspace) = empty_workspace().await;
        assert!(workspace.history().documents().is_empty());
        assert_eq!(workspace.prompts(), &PromptConfig::default());
        assert_eq!(workspace.api_config().provider, Provider::Gemini);
        assert!(workspace.portfolios().is_empty());
        assert_eq!(workspace.theme(), Theme::Dark);
    }

    #[tokio::test]
    async fn test_history_mutations_are_persisted() {
        let (store, mut workspace) = empty_workspace().await;
        let first = proposal("first");
        let second = proposal("second");
        workspace.record(first.clone()).await.unwrap();
        workspace.record(second.clone()).await.unwrap();
        workspace
            .edit_current(DocumentEdit::Subject("Edited".to_string()))
            .await
            .unwrap();
        workspace.delete(first.id).await.unwrap();

        let reloaded = Workspace::load(store).await.unwrap();
        let docs = reloaded.history().documents();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, second.id);
        match &docs[0].payload {
            DocumentPayload::Proposal(draft) => assert_eq!(draft.subject, "Edited"),
            DocumentPayload::Deliverable(_) => panic!("expected proposal"),
        }
        assert!(reloaded.history().current().is_none(), "selection is not persisted");
    }

    #[tokio::test]
    async fn test_settings_are_persisted() {
        let (store, mut workspace) = empty_workspace().await;
        let portfolio = Portfolio {
            id: Uuid::new_v4(),
            name: "Behance".to_string(),
            url: "https://behance.net/me".to_string(),
        };
        let api_config = ApiConfig {
            provider: Provider::Openai,
            keys: ProviderKeys {
                gemini: String::new(),
                openai: "sk-live".to_string(),
            },
        };

        workspace
            .save_prompts(PromptConfig {
                upwork: Some("My upwork prompt".to_string()),
                email: Some("My email prompt".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        workspace.reset_prompt(PromptCategory::Email).await.unwrap();
        workspace.save_api_config(api_config.clone()).await.unwrap();
        workspace
            .save_portfolios(vec![portfolio.clone()])
            .await
            .unwrap();
        workspace.set_theme(Theme::Light).await.unwrap();

        let reloaded = Workspace::load(store).await.unwrap();
        assert_eq!(
            reloaded.prompts().custom(PromptCategory::Upwork),
            Some("My upwork prompt")
        );
        assert_eq!(reloaded.prompts().custom(PromptCategory::Email), None);
        assert_eq!(reloaded.api_config(), &api_config);
        assert_eq!(reloaded.portfolios(), &[portfolio]);
        assert_eq!(reloaded.theme(), Theme::Light);
    }

    #[tokio::test]
    async fn test_selected_portfolios_follow_list_order() {
        let (_, mut workspace) = empty_workspace().await;
        let portfolios: Vec<Portfolio> = ["one", "two", "three"]
            .iter()
            .map(|name| Portfolio {
                id: Uuid::new_v4(),
                name: name.to_string(),
                url: format!("https://{name}.example.com"),
            })
            .collect();
        workspace.save_portfolios(portfolios.clone()).await.unwrap();

        let selected =
            workspace.selected_portfolios(&[portfolios[2].id, portfolios[0].id, Uuid::new_v4()]);
        let names: Vec<&str> = selected.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["one", "three"]);
    }

    #[tokio::test]
    async fn test_corrupt_history_blob_falls_back_to_empty() {
        let store = Arc::new(MemoryStore::new());
        store
            .set(HISTORY_KEY, "[{\"broken\": ".to_string())
            .await
            .unwrap();
        let workspace = Workspace::load(store).await.unwrap();
        assert!(workspace.history().documents().is_empty());
    }

    #[tokio::test]
    async fn test_select_and_clear() {
        let (_, mut workspace) = empty_workspace().await;
        let doc = proposal("a");
        workspace.record(doc.clone()).await.unwrap();
        workspace.clear_selection();
        assert!(workspace.history().current().is_none());

        let selected = workspace.select(doc.id).unwrap();
        assert_eq!(selected.id, doc.id);
        assert!(matches!(
            workspace.select(Uuid::new_v4()),
            Err(AppError::NotFound(_))
        ));
        assert_eq!(workspace.history().current().unwrap().id, doc.id);
    }

    #[tokio::test]
    async fn test_failed_write_leaves_state_unchanged() {
        let store = Arc::new(FlakyStore::default());
        let mut workspace = Workspace::load(store.clone()).await.unwrap();
        let kept = proposal("kept");
        workspace.record(kept.clone()).await.unwrap();

        store.offline.store(true, Ordering::SeqCst);
        let err = workspace.record(proposal("lost")).await.unwrap_err();
        assert!(matches!(err, AppError::Store(_)));
        assert!(workspace.delete(kept.id).await.is_err());
        assert!(workspace.set_theme(Theme::Light).await.is_err());

        assert_eq!(workspace.history().documents(), &[kept.clone()]);
        assert_eq!(workspace.history().current().unwrap().id, kept.id);
        assert_eq!(workspace.theme(), Theme::Dark);

        store.offline.store(false, Ordering::SeqCst);
        let reloaded = Workspace::load(store).await.unwrap();
        assert_eq!(reloaded.history().documents(), &[kept]);
    }

    #[tokio::test]
    async fn test_replace_after_delete_records_document_as_new() {
        let (store, mut workspace) = empty_workspace().await;
        let older = proposal("older");
        let regenerating = proposal("regenerating");
        workspace.record(older.clone()).await.unwrap();
        workspace.record(regenerating.clone()).await.unwrap();
        workspace.delete(regenerating.id).await.unwrap();

        let result = proposal("result");
        workspace
            .replace(regenerating.id, result.clone())
            .await
            .unwrap();

        let ids: Vec<Uuid> = workspace.history().documents().iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![result.id, older.id]);
        assert_eq!(workspace.history().current().unwrap().id, result.id);
        let reloaded = Workspace::load(store).await.unwrap();
        assert_eq!(reloaded.history().documents().len(), 2);
    }

    #[tokio::test]
    async fn test_provider_switch_keeps_stored_keys() {
        let (store, mut workspace) = empty_workspace().await;
        workspace
            .save_api_config(ApiConfig {
                provider: Provider::Gemini,
                keys: ProviderKeys {
                    gemini: "g".to_string(),
                    openai: "sk".to_string(),
                },
            })
            .await
            .unwrap();

        workspace
            .update_api_config(ApiConfigUpdate {
                provider: Some(Provider::Openai),
                ..Default::default()
            })
            .await
            .unwrap();
        workspace.clear_api_key(Provider::Gemini).await.unwrap();

        let reloaded = Workspace::load(store).await.unwrap();
        assert_eq!(reloaded.api_config().provider, Provider::Openai);
        assert_eq!(reloaded.api_config().key_for(Provider::Openai), Some("sk"));
        assert_eq!(reloaded.api_config().key_for(Provider::Gemini), None);
    }
}

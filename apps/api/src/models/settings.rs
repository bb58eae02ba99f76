use serde::{Deserialize, Serialize};

use crate::models::document::{Mode, Platform};

/// Remote LLM backend servicing generation requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Gemini,
    Openai,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Gemini => "gemini",
            Provider::Openai => "openai",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderKeys {
    pub gemini: String,
    pub openai: String,
}

/// Selected provider plus one API key per provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub provider: Provider,
    pub keys: ProviderKeys,
}

impl ApiConfig {
    /// The key stored for `provider`, if it is non-blank.
    pub fn key_for(&self, provider: Provider) -> Option<&str> {
        let key = match provider {
            Provider::Gemini => self.keys.gemini.as_str(),
            Provider::Openai => self.keys.openai.as_str(),
        };
        let key = key.trim();
        (!key.is_empty()).then_some(key)
    }

    /// Merges a settings-screen update. Absent or blank keys keep the stored
    /// value, because the UI never gets the stored keys back to resend.
    pub fn apply(&mut self, update: ApiConfigUpdate) {
        if let Some(provider) = update.provider {
            self.provider = provider;
        }
        let slots = [
            (&mut self.keys.gemini, update.keys.gemini),
            (&mut self.keys.openai, update.keys.openai),
        ];
        for (slot, key) in slots {
            if let Some(key) = key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()) {
                *slot = key;
            }
        }
    }

    pub fn clear_key(&mut self, provider: Provider) {
        match provider {
            Provider::Gemini => self.keys.gemini.clear(),
            Provider::Openai => self.keys.openai.clear(),
        }
    }

    /// Key-free view handed back to the UI.
    pub fn view(&self) -> ApiConfigView {
        ApiConfigView {
            provider: self.provider,
            configured: ConfiguredKeys {
                gemini: self.key_for(Provider::Gemini).is_some(),
                openai: self.key_for(Provider::Openai).is_some(),
            },
        }
    }
}

/// Body of `PUT /settings/api`. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiConfigUpdate {
    pub provider: Option<Provider>,
    pub keys: KeyUpdates,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct KeyUpdates {
    pub gemini: Option<String>,
    pub openai: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfiguredKeys {
    pub gemini: bool,
    pub openai: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiConfigView {
    pub provider: Provider,
    pub configured: ConfiguredKeys,
}

/// Unit of prompt-template override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptCategory {
    Fiverr,
    Upwork,
    Email,
    Deliverable,
}

impl PromptCategory {
    pub const ALL: [PromptCategory; 4] = [
        PromptCategory::Fiverr,
        PromptCategory::Upwork,
        PromptCategory::Email,
        PromptCategory::Deliverable,
    ];

    /// Deliverable mode wins over the platform; among proposals, email and
    /// fiverr have their own templates and everything else is upwork.
    pub fn select(platform: Platform, mode: Mode) -> Self {
        match (mode, platform) {
            (Mode::Deliverable, _) => PromptCategory::Deliverable,
            (Mode::Proposal, Platform::Email) => PromptCategory::Email,
            (Mode::Proposal, Platform::Fiverr) => PromptCategory::Fiverr,
            (Mode::Proposal, Platform::Upwork) => PromptCategory::Upwork,
        }
    }
}

/// User overrides per category. `None` means the built-in default applies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    pub fiverr: Option<String>,
    pub upwork: Option<String>,
    pub email: Option<String>,
    pub deliverable: Option<String>,
}

impl PromptConfig {
    fn slot(&self, category: PromptCategory) -> &Option<String> {
        match category {
            PromptCategory::Fiverr => &self.fiverr,
            PromptCategory::Upwork => &self.upwork,
            PromptCategory::Email => &self.email,
            PromptCategory::Deliverable => &self.deliverable,
        }
    }

    fn slot_mut(&mut self, category: PromptCategory) -> &mut Option<String> {
        match category {
            PromptCategory::Fiverr => &mut self.fiverr,
            PromptCategory::Upwork => &mut self.upwork,
            PromptCategory::Email => &mut self.email,
            PromptCategory::Deliverable => &mut self.deliverable,
        }
    }

    /// The custom template for `category`, ignoring blank overrides.
    pub fn custom(&self, category: PromptCategory) -> Option<&str> {
        self.slot(category)
            .as_deref()
            .filter(|template| !template.trim().is_empty())
    }

    /// The override to send for a (platform, mode) request.
    pub fn override_for(&self, platform: Platform, mode: Mode) -> Option<&str> {
        self.custom(PromptCategory::select(platform, mode))
    }

    pub fn reset(&mut self, category: PromptCategory) {
        *self.slot_mut(category) = None;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_for_ignores_blank_keys() {
        let config = ApiConfig {
            provider: Provider::Openai,
            keys: ProviderKeys {
                gemini: "g-key".to_string(),
                openai: "   ".to_string(),
            },
        };
        assert_eq!(config.key_for(Provider::Gemini), Some("g-key"));
        assert_eq!(config.key_for(Provider::Openai), None);
        assert!(config.view().configured.gemini);
        assert!(!config.view().configured.openai);
    }

    #[test]
    fn test_api_config_defaults_to_gemini() {
        let config: ApiConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.provider, Provider::Gemini);
        assert_eq!(config.key_for(Provider::Gemini), None);
    }

    #[test]
    fn test_apply_update_keeps_keys_it_does_not_mention() {
        let mut config = ApiConfig {
            provider: Provider::Gemini,
            keys: ProviderKeys {
                gemini: "g".to_string(),
                openai: "sk".to_string(),
            },
        };

        let switch: ApiConfigUpdate = serde_json::from_str(r#"{"provider": "openai"}"#).unwrap();
        config.apply(switch);
        assert_eq!(config.provider, Provider::Openai);
        assert_eq!(config.key_for(Provider::Gemini), Some("g"));
        assert_eq!(config.key_for(Provider::Openai), Some("sk"));

        let blanks: ApiConfigUpdate =
            serde_json::from_str(r#"{"keys": {"gemini": "", "openai": " sk-new "}}"#).unwrap();
        config.apply(blanks);
        assert_eq!(config.provider, Provider::Openai);
        assert_eq!(config.key_for(Provider::Gemini), Some("g"));
        assert_eq!(config.key_for(Provider::Openai), Some("sk-new"));

        config.clear_key(Provider::Gemini);
        assert_eq!(config.key_for(Provider::Gemini), None);
        assert!(config.view().configured.openai);
    }

    #[test]
    fn test_category_selection() {
        for platform in [Platform::Fiverr, Platform::Upwork, Platform::Email] {
            assert_eq!(
                PromptCategory::select(platform, Mode::Deliverable),
                PromptCategory::Deliverable
            );
        }
        assert_eq!(
            PromptCategory::select(Platform::Email, Mode::Proposal),
            PromptCategory::Email
        );
        assert_eq!(
            PromptCategory::select(Platform::Fiverr, Mode::Proposal),
            PromptCategory::Fiverr
        );
        assert_eq!(
            PromptCategory::select(Platform::Upwork, Mode::Proposal),
            PromptCategory::Upwork
        );
    }

    #[test]
    fn test_prompt_override_and_reset() {
        let mut prompts = PromptConfig {
            email: Some("Write a short email.".to_string()),
            fiverr: Some("".to_string()),
            ..Default::default()
        };
        assert_eq!(
            prompts.override_for(Platform::Email, Mode::Proposal),
            Some("Write a short email.")
        );
        assert_eq!(prompts.override_for(Platform::Email, Mode::Deliverable), None);
        assert_eq!(prompts.custom(PromptCategory::Fiverr), None);

        prompts.reset(PromptCategory::Email);
        assert_eq!(prompts.custom(PromptCategory::Email), None);
    }

    #[test]
    fn test_theme_defaults_to_dark() {
        assert_eq!(Theme::default(), Theme::Dark);
        assert_eq!(serde_json::to_string(&Theme::Light).unwrap(), "\"light\"");
    }
}

//! Prompt composition: picks the base template, sampling parameters and
//! response schema for a request, then appends the tone and portfolio clauses.
//!
//! Pure: the same inputs always produce the same prompt.

use crate::generation::prompts::{default_template, PORTFOLIO_INSTRUCTION};
use crate::generation::schema::SchemaKind;
use crate::generation::tone::tone_clause;
use crate::llm_client::Sampling;
use crate::models::document::{Mode, Platform, Tone};
use crate::models::portfolio::Portfolio;
use crate::models::settings::PromptCategory;

const DEFAULT_TEMPERATURE: f64 = 0.7;
const CREATIVE_TEMPERATURE: f64 = 0.8;
const EMAIL_TOP_P: f64 = 0.9;

#[derive(Debug, Clone, PartialEq)]
pub struct ComposedPrompt {
    pub prompt: String,
    pub sampling: Sampling,
    pub schema: SchemaKind,
}

/// Builds the final instruction string for one generation request.
///
/// A non-empty `prompt_override` replaces the category default and switches
/// sampling to the override defaults (no top-p).
pub fn compose(
    mode: Mode,
    platform: Platform,
    tone: Tone,
    portfolios: &[Portfolio],
    prompt_override: Option<&str>,
) -> ComposedPrompt {
    let (mut prompt, sampling) = match prompt_override.filter(|p| !p.is_empty()) {
        Some(template) => (template.to_string(), override_sampling(mode)),
        None => {
            let category = PromptCategory::select(platform, mode);
            (
                default_template(category).to_string(),
                default_sampling(category),
            )
        }
    };

    if let Some(clause) = tone_clause(tone) {
        prompt.push_str(&clause);
    }

    if !portfolios.is_empty() {
        prompt.push_str(&portfolio_block(portfolios));
    }

    ComposedPrompt {
        prompt,
        sampling,
        schema: SchemaKind::for_mode(mode),
    }
}

fn default_sampling(category: PromptCategory) -> Sampling {
    match category {
        PromptCategory::Email => Sampling {
            temperature: CREATIVE_TEMPERATURE,
            top_p: Some(EMAIL_TOP_P),
        },
        PromptCategory::Deliverable | PromptCategory::Fiverr | PromptCategory::Upwork => {
            Sampling {
                temperature: DEFAULT_TEMPERATURE,
                top_p: None,
            }
        }
    }
}

fn override_sampling(mode: Mode) -> Sampling {
    let temperature = match mode {
        Mode::Deliverable => DEFAULT_TEMPERATURE,
        Mode::Proposal => CREATIVE_TEMPERATURE,
    };
    Sampling {
        temperature,
        top_p: None,
    }
}

fn portfolio_block(portfolios: &[Portfolio]) -> String {
    let links = portfolios
        .iter()
        .map(|p| format!("- {}: {}", p.name, p.url))
        .collect::<Vec<_>>()
        .join("\n");
    format!("\n\n{PORTFOLIO_INSTRUCTION}\n\nLinks:\n{links}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::prompts::{
        DELIVERABLE_TEMPLATE, EMAIL_TEMPLATE, FIVERR_TEMPLATE, UPWORK_TEMPLATE,
    };
    use crate::generation::tone::tone_elaboration;
    use uuid::Uuid;

    const PLATFORMS: [Platform; 3] = [Platform::Fiverr, Platform::Upwork, Platform::Email];
    const MODES: [Mode; 2] = [Mode::Deliverable, Mode::Proposal];
    const TONES: [Tone; 5] = [
        Tone::Standard,
        Tone::Formal,
        Tone::Casual,
        Tone::Urgent,
        Tone::Persuasive,
    ];

    fn portfolio(name: &str, url: &str) -> Portfolio {
        Portfolio {
            id: Uuid::new_v4(),
            name: name.to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn test_default_template_selection() {
        let pick = |platform, mode| compose(mode, platform, Tone::Standard, &[], None).prompt;

        for platform in PLATFORMS {
            assert_eq!(pick(platform, Mode::Deliverable), DELIVERABLE_TEMPLATE);
        }
        assert_eq!(pick(Platform::Email, Mode::Proposal), EMAIL_TEMPLATE);
        assert_eq!(pick(Platform::Fiverr, Mode::Proposal), FIVERR_TEMPLATE);
        assert_eq!(pick(Platform::Upwork, Mode::Proposal), UPWORK_TEMPLATE);
    }

    #[test]
    fn test_default_sampling() {
        let sampling = |platform, mode| compose(mode, platform, Tone::Standard, &[], None).sampling;

        for platform in PLATFORMS {
            assert_eq!(
                sampling(platform, Mode::Deliverable),
                Sampling {
                    temperature: 0.7,
                    top_p: None
                }
            );
        }
        assert_eq!(
            sampling(Platform::Email, Mode::Proposal),
            Sampling {
                temperature: 0.8,
                top_p: Some(0.9)
            }
        );
        assert_eq!(sampling(Platform::Fiverr, Mode::Proposal).temperature, 0.7);
        assert_eq!(sampling(Platform::Upwork, Mode::Proposal).top_p, None);
    }

    #[test]
    fn test_override_replaces_template_and_sampling() {
        let composed = compose(
            Mode::Proposal,
            Platform::Email,
            Tone::Standard,
            &[],
            Some("Custom email prompt"),
        );
        assert_eq!(composed.prompt, "Custom email prompt");
        assert_eq!(
            composed.sampling,
            Sampling {
                temperature: 0.8,
                top_p: None
            }
        );

        let composed = compose(
            Mode::Deliverable,
            Platform::Upwork,
            Tone::Standard,
            &[],
            Some("Custom plan prompt"),
        );
        assert_eq!(composed.prompt, "Custom plan prompt");
        assert_eq!(composed.sampling.temperature, 0.7);
    }

    #[test]
    fn test_empty_override_falls_back_to_default() {
        let composed = compose(Mode::Proposal, Platform::Email, Tone::Standard, &[], Some(""));
        assert_eq!(composed.prompt, EMAIL_TEMPLATE);
        assert_eq!(composed.sampling.top_p, Some(0.9));
    }

    #[test]
    fn test_tone_clause_appended_iff_not_standard() {
        for tone in TONES {
            let composed = compose(Mode::Proposal, Platform::Upwork, tone, &[], None);
            match tone_elaboration(tone) {
                None => assert_eq!(composed.prompt, UPWORK_TEMPLATE),
                Some(sentence) => {
                    assert!(composed.prompt.starts_with(UPWORK_TEMPLATE));
                    assert_eq!(composed.prompt.matches("[TONE ADJUSTMENT]").count(), 1);
                    assert!(composed.prompt.ends_with(sentence));
                }
            }
        }
    }

    #[test]
    fn test_fiverr_proposal_urgent_without_portfolios() {
        let composed = compose(Mode::Proposal, Platform::Fiverr, Tone::Urgent, &[], None);
        assert_eq!(
            composed.prompt,
            format!(
                "{FIVERR_TEMPLATE}\n\n[TONE ADJUSTMENT]: Ensure the tone is explicitly URGENT. \
                 Emphasize speed, immediate availability, and critical timelines."
            )
        );
        assert!(!composed.prompt.contains("[PORTFOLIO INJECTION]"));
    }

    #[test]
    fn test_fiverr_deliverable_urgent_uses_deliverable_template() {
        let composed = compose(Mode::Deliverable, Platform::Fiverr, Tone::Urgent, &[], None);
        assert!(composed.prompt.starts_with(DELIVERABLE_TEMPLATE));
        assert!(composed.prompt.ends_with(tone_elaboration(Tone::Urgent).unwrap()));
        assert!(!composed.prompt.contains("[PORTFOLIO INJECTION]"));
        assert_eq!(composed.schema, SchemaKind::Deliverable);
    }

    #[test]
    fn test_portfolio_block_lists_links_in_order() {
        let portfolios = vec![
            portfolio("Dribbble", "https://dribbble.com/me"),
            portfolio("GitHub", "https://github.com/me"),
        ];
        let composed = compose(
            Mode::Proposal,
            Platform::Upwork,
            Tone::Casual,
            &portfolios,
            None,
        );

        assert!(composed.prompt.ends_with(
            "\n\nLinks:\n- Dribbble: https://dribbble.com/me\n- GitHub: https://github.com/me"
        ));
        let tone_at = composed.prompt.find("[TONE ADJUSTMENT]").unwrap();
        let portfolio_at = composed.prompt.find("[PORTFOLIO INJECTION]").unwrap();
        assert!(tone_at < portfolio_at, "tone clause precedes portfolio block");
    }

    #[test]
    fn test_portfolio_block_absent_for_empty_list() {
        for mode in MODES {
            let composed = compose(mode, Platform::Email, Tone::Formal, &[], None);
            assert!(!composed.prompt.contains("[PORTFOLIO INJECTION]"));
            assert!(!composed.prompt.contains("Links:"));
        }
    }

    #[test]
    fn test_schema_follows_mode() {
        for platform in PLATFORMS {
            for tone in TONES {
                assert_eq!(
                    compose(Mode::Deliverable, platform, tone, &[], None).schema,
                    SchemaKind::Deliverable
                );
                assert_eq!(
                    compose(Mode::Proposal, platform, tone, &[], Some("x")).schema,
                    SchemaKind::Proposal
                );
            }
        }
    }

    #[test]
    fn test_compose_is_deterministic() {
        let portfolios = vec![portfolio("Site", "https://example.com")];
        for platform in PLATFORMS {
            for mode in MODES {
                for tone in TONES {
                    let a = compose(mode, platform, tone, &portfolios, None);
                    let b = compose(mode, platform, tone, &portfolios, None);
                    assert_eq!(a, b);
                }
            }
        }
    }
}

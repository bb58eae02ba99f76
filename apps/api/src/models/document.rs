use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use crate::models::portfolio::Portfolio;

/// Target channel for the generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Fiverr,
    Upwork,
    Email,
}

/// Document shape to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Deliverable,
    Proposal,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Deliverable => "deliverable",
            Mode::Proposal => "proposal",
        }
    }
}

/// Stylistic adjustment layered on top of the base template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Standard,
    Formal,
    Casual,
    Urgent,
    Persuasive,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Standard => "standard",
            Tone::Formal => "formal",
            Tone::Casual => "casual",
            Tone::Urgent => "urgent",
            Tone::Persuasive => "persuasive",
        }
    }
}

// ─── Lenient field decoding ─────────────────────────────────────────────────
//
// Model output is valid JSON but not always well-typed. Each field decodes on
// its own: a null or mistyped field takes its default, the rest are kept.

fn text_of(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(text_of(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_optional_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(text_of(Value::deserialize(deserializer)?))
}

/// Keeps the list items that decode and drops the rest.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| T::deserialize(item).ok())
            .collect()),
        _ => Ok(Vec::new()),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Step {
    #[serde(deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(deserialize_with = "lenient_text")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProposalSection {
    #[serde(deserialize_with = "lenient_text")]
    pub label: String,
    #[serde(deserialize_with = "lenient_text")]
    pub content: String,
}

/// Project plan payload. Every field defaults so a partial or empty model
/// response still yields a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliverablePlan {
    #[serde(deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(deserialize_with = "lenient_text")]
    pub overview: String,
    #[serde(deserialize_with = "lenient_list")]
    pub steps: Vec<Step>,
    #[serde(deserialize_with = "lenient_list")]
    pub deliverables: Vec<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub requirements: Vec<String>,
    #[serde(
        deserialize_with = "lenient_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub timeline: Option<String>,
    #[serde(
        deserialize_with = "lenient_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub payment: Option<String>,
}

/// Outreach pitch payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProposalDraft {
    #[serde(deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(deserialize_with = "lenient_text")]
    pub subject: String,
    #[serde(deserialize_with = "lenient_list")]
    pub proposal_sections: Vec<ProposalSection>,
}

/// Mode-dependent body of a document. `mode` is the tag, so the payload shape
/// can never disagree with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum DocumentPayload {
    Deliverable(DeliverablePlan),
    Proposal(ProposalDraft),
}

impl DocumentPayload {
    pub fn mode(&self) -> Mode {
        match self {
            DocumentPayload::Deliverable(_) => Mode::Deliverable,
            DocumentPayload::Proposal(_) => Mode::Proposal,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            DocumentPayload::Deliverable(plan) => &plan.title,
            DocumentPayload::Proposal(draft) => &draft.title,
        }
    }

    /// Builds a payload from a parsed model response.
    ///
    /// Fields are decoded one by one, so a bad field only loses itself. A
    /// value that is not an object at all is treated like an empty response.
    pub fn from_generated(mode: Mode, value: Value) -> Self {
        match mode {
            Mode::Deliverable => DocumentPayload::Deliverable(
                serde_json::from_value(value).unwrap_or_else(|e| {
                    warn!("Generated deliverable did not match schema, using empty plan: {e}");
                    DeliverablePlan::default()
                }),
            ),
            Mode::Proposal => DocumentPayload::Proposal(
                serde_json::from_value(value).unwrap_or_else(|e| {
                    warn!("Generated proposal did not match schema, using empty draft: {e}");
                    ProposalDraft::default()
                }),
            ),
        }
    }
}

/// The generated artifact shown and edited by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: Uuid,
    pub platform: Platform,
    #[serde(rename = "timestamp", with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    pub original_input: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<Tone>,
    #[serde(default)]
    pub included_portfolios: Vec<Portfolio>,
    #[serde(flatten)]
    pub payload: DocumentPayload,
}

impl Document {
    pub fn mode(&self) -> Mode {
        self.payload.mode()
    }

    pub fn title(&self) -> &str {
        self.payload.title()
    }

    /// Applies a single field edit in place.
    pub fn apply(&mut self, edit: DocumentEdit) -> Result<(), EditError> {
        let mode = self.mode();
        match (&mut self.payload, edit) {
            (DocumentPayload::Deliverable(plan), DocumentEdit::Title(v)) => plan.title = v,
            (DocumentPayload::Proposal(draft), DocumentEdit::Title(v)) => draft.title = v,
            (DocumentPayload::Deliverable(plan), DocumentEdit::Overview(v)) => plan.overview = v,
            (DocumentPayload::Deliverable(plan), DocumentEdit::Steps(v)) => plan.steps = v,
            (DocumentPayload::Deliverable(plan), DocumentEdit::Deliverables(v)) => {
                plan.deliverables = v
            }
            (DocumentPayload::Deliverable(plan), DocumentEdit::Requirements(v)) => {
                plan.requirements = v
            }
            (DocumentPayload::Deliverable(plan), DocumentEdit::Timeline(v)) => plan.timeline = v,
            (DocumentPayload::Deliverable(plan), DocumentEdit::Payment(v)) => plan.payment = v,
            (DocumentPayload::Proposal(draft), DocumentEdit::Subject(v)) => draft.subject = v,
            (DocumentPayload::Proposal(draft), DocumentEdit::ProposalSections(v)) => {
                draft.proposal_sections = v
            }
            (_, edit) => {
                return Err(EditError::FieldMismatch {
                    field: edit.field_name(),
                    mode,
                })
            }
        }
        Ok(())
    }
}

/// A single in-place edit of a document field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum DocumentEdit {
    Title(String),
    Overview(String),
    Steps(Vec<Step>),
    Deliverables(Vec<String>),
    Requirements(Vec<String>),
    Timeline(Option<String>),
    Payment(Option<String>),
    Subject(String),
    ProposalSections(Vec<ProposalSection>),
}

impl DocumentEdit {
    pub fn field_name(&self) -> &'static str {
        match self {
            DocumentEdit::Title(_) => "title",
            DocumentEdit::Overview(_) => "overview",
            DocumentEdit::Steps(_) => "steps",
            DocumentEdit::Deliverables(_) => "deliverables",
            DocumentEdit::Requirements(_) => "requirements",
            DocumentEdit::Timeline(_) => "timeline",
            DocumentEdit::Payment(_) => "payment",
            DocumentEdit::Subject(_) => "subject",
            DocumentEdit::ProposalSections(_) => "proposalSections",
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum EditError {
    #[error("field `{field}` does not apply to {} documents", mode.as_str())]
    FieldMismatch { field: &'static str, mode: Mode },
}

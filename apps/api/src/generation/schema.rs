//! The two response schemas every provider integration must conform to.
//!
//! Types use the upper-case OpenAPI-subset names accepted by Gemini's
//! `responseSchema`; the same documents are rendered verbatim into the
//! OpenAI system message.

use std::sync::OnceLock;

use serde_json::{json, Value};

use crate::models::document::Mode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    Deliverable,
    Proposal,
}

impl SchemaKind {
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Deliverable => SchemaKind::Deliverable,
            Mode::Proposal => SchemaKind::Proposal,
        }
    }

    pub fn schema(&self) -> &'static Value {
        static DELIVERABLE: OnceLock<Value> = OnceLock::new();
        static PROPOSAL: OnceLock<Value> = OnceLock::new();
        match self {
            SchemaKind::Deliverable => DELIVERABLE.get_or_init(deliverable_schema),
            SchemaKind::Proposal => PROPOSAL.get_or_init(proposal_schema),
        }
    }
}

fn deliverable_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING", "description": "A simple, clear project title" },
            "overview": {
                "type": "STRING",
                "description": "A brief, one-sentence summary of the project goal"
            },
            "steps": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "description": { "type": "STRING" }
                    },
                    "required": ["title", "description"]
                },
                "description": "A 3-4 step-by-step process to complete the project"
            },
            "deliverables": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Specific, measurable items to be delivered"
            },
            "requirements": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Items needed from the client to start immediately"
            },
            "timeline": { "type": "STRING" },
            "payment": { "type": "STRING" }
        },
        "required": [
            "title", "overview", "steps", "deliverables", "requirements", "timeline", "payment"
        ]
    })
}

fn proposal_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING", "description": "Short internal name for the campaign" },
            "subject": { "type": "STRING", "description": "Catchy subject line or opening hook" },
            "proposalSections": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "label": {
                            "type": "STRING",
                            "description": "Section label like Hook, The Plan, Solution, or CTA"
                        },
                        "content": {
                            "type": "STRING",
                            "description": "The content of this section"
                        }
                    },
                    "required": ["label", "content"]
                },
                "description": "The proposal broken into logical humanized sections."
            }
        },
        "required": ["title", "subject", "proposalSections"]
    })
}

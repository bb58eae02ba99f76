//! Plain-text rendering of a document for pasting into a marketplace or mail client.

use crate::models::document::{Document, DocumentPayload};

pub fn render_plain_text(document: &Document) -> String {
    match &document.payload {
        DocumentPayload::Proposal(draft) => {
            let body = draft
                .proposal_sections
                .iter()
                .map(|s| s.content.as_str())
                .collect::<Vec<_>>()
                .join("\n\n");
            format!("Subject: {}\n\n{body}", draft.subject)
        }
        DocumentPayload::Deliverable(plan) => {
            let steps = plan
                .steps
                .iter()
                .enumerate()
                .map(|(i, s)| format!("{}. {}: {}", i + 1, s.title, s.description))
                .collect::<Vec<_>>()
                .join("\n");
            format!(
                "# {}\n\nOVERVIEW\n{}\n\nSTEPS\n{steps}",
                plan.title, plan.overview
            )
        }
    }
}

//! Document history, newest first, with an optional current selection.
//!
//! The current document is tracked by id, so the displayed document and its
//! history entry are always the same record.

use thiserror::Error;
use uuid::Uuid;

use crate::models::document::{Document, DocumentEdit, EditError};

#[derive(Debug, Error, PartialEq)]
pub enum HistoryError {
    #[error("Document {0} not found")]
    NotFound(Uuid),

    #[error("No document is selected")]
    NoSelection,

    #[error(transparent)]
    Edit(#[from] EditError),
}

#[derive(Debug, Clone, Default)]
pub struct History {
    documents: Vec<Document>,
    current: Option<Uuid>,
}

impl History {
    pub fn new(documents: Vec<Document>) -> Self {
        Self {
            documents,
            current: None,
        }
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn get(&self, id: Uuid) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    fn get_mut(&mut self, id: Uuid) -> Option<&mut Document> {
        self.documents.iter_mut().find(|d| d.id == id)
    }

    pub fn current(&self) -> Option<&Document> {
        self.current.and_then(|id| self.get(id))
    }

    /// Adds a freshly generated document at the front and selects it.
    pub fn insert(&mut self, document: Document) {
        self.current = Some(document.id);
        self.documents.insert(0, document);
    }

    /// Puts `document` into the slot held by `id` and selects it.
    pub fn replace(&mut self, id: Uuid, document: Document) -> Result<(), HistoryError> {
        let new_id = document.id;
        let slot = self.get_mut(id).ok_or(HistoryError::NotFound(id))?;
        *slot = document;
        self.current = Some(new_id);
        Ok(())
    }

    pub fn select(&mut self, id: Uuid) -> Result<&Document, HistoryError> {
        if self.get(id).is_none() {
            return Err(HistoryError::NotFound(id));
        }
        self.current = Some(id);
        self.get(id).ok_or(HistoryError::NotFound(id))
    }

    pub fn clear_selection(&mut self) {
        self.current = None;
    }

    /// Applies `edit` to the current document. A rejected edit leaves it untouched.
    pub fn edit_current(&mut self, edit: DocumentEdit) -> Result<&Document, HistoryError> {
        let id = self.current.ok_or(HistoryError::NoSelection)?;
        let document = self.get_mut(id).ok_or(HistoryError::NoSelection)?;
        document.apply(edit)?;
        Ok(document)
    }

    /// Removes exactly the entry with `id`, clearing the selection if it was current.
    pub fn remove(&mut self, id: Uuid) -> Result<Document, HistoryError> {
        let index = self
            .documents
            .iter()
            .position(|d| d.id == id)
            .ok_or(HistoryError::NotFound(id))?;
        if self.current == Some(id) {
            self.current = None;
        }
        Ok(self.documents.remove(index))
    }
}

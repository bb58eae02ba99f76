use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user-managed portfolio link. Documents keep copies, not references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Portfolio {
    pub id: Uuid,
    pub name: String,
    pub url: String,
}

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::generation::dispatcher::Dispatcher;
use crate::generation::gate::GenerationGate;
use crate::workspace::Workspace;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The one user session. Never locked across a provider call.
    pub workspace: Arc<Mutex<Workspace>>,
    pub dispatcher: Dispatcher,
    pub generation_gate: GenerationGate,
}

impl AppState {
    pub fn new(workspace: Workspace, dispatcher: Dispatcher) -> Self {
        Self {
            workspace: Arc::new(Mutex::new(workspace)),
            dispatcher,
            generation_gate: GenerationGate::default(),
        }
    }
}

// Document generation: prompt composition, provider dispatch and the HTTP
// handlers that record results in the workspace.
// All provider HTTP calls go through llm_client.

pub mod composer;
pub mod dispatcher;
pub mod gate;
pub mod handlers;
pub mod prompts;
pub mod schema;
pub mod tone;

//! Recording backend used by tests instead of the network.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::llm_client::{GenerationBackend, GenerationRequest, LlmError, Sampling};
use crate::models::settings::Provider;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub api_key: String,
    pub prompt: String,
    pub input: String,
    pub schema: Value,
    pub sampling: Sampling,
}

pub struct MockBackend {
    provider: Provider,
    response: Result<Value, (u16, String)>,
    calls: AtomicUsize,
    last: Mutex<Option<RecordedCall>>,
}

impl MockBackend {
    pub fn returning(provider: Provider, response: Value) -> Self {
        Self {
            provider,
            response: Ok(response),
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }

    pub fn failing(provider: Provider, status: u16, body: &str) -> Self {
        Self {
            provider,
            response: Err((status, body.to_string())),
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_call(&self) -> Option<RecordedCall> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationBackend for MockBackend {
    fn provider(&self) -> Provider {
        self.provider
    }

    async fn generate(
        &self,
        api_key: &str,
        request: &GenerationRequest<'_>,
    ) -> Result<Value, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(RecordedCall {
            api_key: api_key.to_string(),
            prompt: request.prompt.to_string(),
            input: request.input.to_string(),
            schema: request.schema.clone(),
            sampling: request.sampling,
        });

        match &self.response {
            Ok(value) => Ok(value.clone()),
            Err((status, message)) => Err(LlmError::Api {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}

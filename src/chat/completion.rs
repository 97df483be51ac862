//! Completion client: turns one utterance into one bot reply

use crate::llm::{LlmRequest, LlmService};
use std::sync::Arc;

/// Reply used when the provider answers with no text
pub const FALLBACK_REPLY: &str = "Sorry, I couldn't understand that.";

/// Wraps the remote model call. Never fails: any provider error becomes
/// reply text prefixed with `Error: `.
#[derive(Clone)]
pub struct CompletionClient {
    service: Arc<dyn LlmService>,
    max_tokens: Option<u32>,
}

impl CompletionClient {
    pub fn new(service: Arc<dyn LlmService>) -> Self {
        Self {
            service,
            max_tokens: None,
        }
    }

    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn model_id(&self) -> &str {
        self.service.model_id()
    }

    /// Ask the model about `utterance` alone; no earlier turns are sent.
    pub async fn reply(&self, utterance: &str) -> String {
        let request = LlmRequest::new(utterance).with_max_tokens(self.max_tokens);
        match self.service.complete(&request).await {
            Ok(response) if response.is_blank() => FALLBACK_REPLY.to_string(),
            Ok(response) => response.text,
            Err(e) => format!("Error: {e}"),
        }
    }
}

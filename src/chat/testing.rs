//! Mock implementations for testing
//!
//! These mocks enable testing the chat layer without network I/O.

use crate::llm::{LlmError, LlmRequest, LlmResponse, LlmService};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tokio::sync::Notify;

/// Mock LLM service that returns queued responses in call order
pub struct MockLlmService {
    responses: Mutex<VecDeque<Result<LlmResponse, LlmError>>>,
    model_id: String,
    held: AtomicBool,
    release: Notify,
    seen: Notify,
    /// Record of all requests made
    pub requests: Mutex<Vec<LlmRequest>>,
}

#[allow(dead_code)]
impl MockLlmService {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            model_id: model_id.into(),
            held: AtomicBool::new(false),
            release: Notify::new(),
            seen: Notify::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful response
    pub fn queue_response(&self, response: LlmResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    /// Queue a successful plain-text response
    pub fn queue_text(&self, text: &str) {
        self.queue_response(LlmResponse::text(text));
    }

    /// Queue an error response
    pub fn queue_error(&self, error: LlmError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Make every call wait for `release` before answering
    pub fn hold(&self) {
        self.held.store(true, Ordering::SeqCst);
    }

    /// Let one held call answer
    pub fn release(&self) {
        self.release.notify_one();
    }

    /// Wait until a request has been recorded
    pub async fn wait_for_request(&self) {
        self.seen.notified().await;
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Get the prompt of every recorded request
    pub fn recorded_prompts(&self) -> Vec<String> {
        self.recorded_requests()
            .into_iter()
            .map(|r| r.prompt)
            .collect()
    }
}

#[async_trait]
impl LlmService for MockLlmService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        self.seen.notify_one();
        if self.held.load(Ordering::SeqCst) {
            self.release.notified().await;
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::network("No mock response queued")))
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

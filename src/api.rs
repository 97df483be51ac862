//! HTTP API and page serving

mod assets;
mod handlers;
mod sse;
mod types;

pub use handlers::create_router;

use crate::chat::{CompletionClient, SessionManager};
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionManager>,
    pub completion: CompletionClient,
}

impl AppState {
    pub fn new(completion: CompletionClient) -> Self {
        Self {
            sessions: Arc::new(SessionManager::new()),
            completion,
        }
    }
}

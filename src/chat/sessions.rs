//! Session registry keyed by session id

use super::ChatSession;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Owns every live session. Sessions share nothing with each other.
#[derive(Default)]
pub struct SessionManager {
    sessions: RwLock<HashMap<Uuid, Arc<ChatSession>>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new, empty session
    pub async fn create(&self) -> Arc<ChatSession> {
        let id = Uuid::new_v4();
        let session = Arc::new(ChatSession::new(id));
        self.sessions.write().await.insert(id, session.clone());
        let live_sessions = self.len().await;
        tracing::info!(session = %id, live_sessions, "Session started");
        session
    }

    pub async fn get(&self, id: Uuid) -> Option<Arc<ChatSession>> {
        self.sessions.read().await.get(&id).cloned()
    }

    /// Drop a session and its transcript. Returns false if it did not exist.
    pub async fn end(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id);
        match removed {
            Some(session) => {
                session.end();
                let live_sessions = self.len().await;
                tracing::info!(
                    session = %id,
                    turns = session.turn_count(),
                    live_sessions,
                    "Session ended"
                );
                true
            }
            None => false,
        }
    }

    /// Number of live sessions
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

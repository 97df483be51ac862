//! API request and response types

use crate::chat::{CyclePhase, Turn};
use serde::{Deserialize, Serialize};

/// Response for session creation
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    pub session_id: String,
}

/// Full transcript of a session
#[derive(Debug, Serialize, Deserialize)]
pub struct TranscriptResponse {
    pub session_id: String,
    pub phase: CyclePhase,
    pub turns: Vec<Turn>,
}

/// Request to send a chat message
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    pub text: String,
}

/// Response for chat action
///
/// `turns` holds the user and bot turns appended by this cycle, or nothing
/// when the submission was blocked.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub accepted: bool,
    pub turns: Vec<Turn>,
}

/// Response for lifecycle actions
#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Response for model info
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelResponse {
    pub model: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

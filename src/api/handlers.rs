//! HTTP request handlers

use super::assets::{get_index_html, serve_static};
use super::sse::sse_stream;
use super::types::{
    ChatRequest, ChatResponse, CreateSessionResponse, ErrorResponse, ModelResponse,
    SuccessResponse, TranscriptResponse,
};
use super::AppState;
use crate::chat::{ChatSession, Submission};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use uuid::Uuid;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Root serves the chat page
        .route("/", get(serve_page))
        // Static assets (embedded or filesystem fallback)
        .route("/assets/*path", get(serve_static))
        // Session lifecycle
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/:id", get(get_transcript))
        .route("/api/sessions/:id/end", post(end_session))
        // Render stream
        .route("/api/sessions/:id/stream", get(stream_session))
        // Request cycle
        .route("/api/sessions/:id/chat", post(send_chat))
        // Model info
        .route("/api/model", get(get_model))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Page
// ============================================================

async fn serve_page() -> impl IntoResponse {
    match get_index_html() {
        Some(content) => Html(content).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Html("<h1>404 - chat page not found</h1>".to_string()),
        )
            .into_response(),
    }
}

// ============================================================
// Sessions
// ============================================================

async fn create_session(State(state): State<AppState>) -> Json<CreateSessionResponse> {
    let session = state.sessions.create().await;
    Json(CreateSessionResponse {
        session_id: session.id().to_string(),
    })
}

async fn get_transcript(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TranscriptResponse>, AppError> {
    let session = find_session(&state, &id).await?;
    Ok(Json(TranscriptResponse {
        session_id: session.id().to_string(),
        phase: session.phase(),
        turns: session.read_all(),
    }))
}

async fn end_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    let id = parse_session_id(&id)?;
    if state.sessions.end(id).await {
        Ok(Json(SuccessResponse { success: true }))
    } else {
        Err(AppError::NotFound(format!("Session not found: {id}")))
    }
}

async fn stream_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let session = find_session(&state, &id).await?;
    let (init, rx) = session.subscribe();
    Ok(sse_stream(init, rx))
}

// ============================================================
// Request Cycle
// ============================================================

async fn send_chat(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let session = find_session(&state, &id).await?;
    let completion = state.completion.clone();

    // Detached so a dropped connection cannot strand the user turn
    let outcome = tokio::spawn(async move { session.submit(&completion, &req.text).await })
        .await
        .map_err(|e| AppError::Internal(format!("Request cycle failed: {e}")))?;

    Ok(Json(match outcome {
        Submission::Blocked => ChatResponse {
            accepted: false,
            turns: vec![],
        },
        Submission::Completed { user, bot } => ChatResponse {
            accepted: true,
            turns: vec![user, bot],
        },
    }))
}

// ============================================================
// Info
// ============================================================

async fn get_model(State(state): State<AppState>) -> Json<ModelResponse> {
    Json(ModelResponse {
        model: state.completion.model_id().to_string(),
    })
}

async fn get_version() -> &'static str {
    concat!("fintech-chat ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Helpers
// ============================================================

fn parse_session_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest(format!("Invalid session id: {raw}")))
}

async fn find_session(state: &AppState, raw: &str) -> Result<Arc<ChatSession>, AppError> {
    let id = parse_session_id(raw)?;
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session not found: {id}")))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}

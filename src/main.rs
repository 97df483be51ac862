//! FinTech Chatbot
//!
//! A single-page chat that forwards each user message to Gemini and keeps
//! the exchange as a per-session transcript in memory.

mod api;
mod chat;
mod llm;

use api::{create_router, AppState};
use chat::CompletionClient;
use llm::LlmConfig;
use std::net::SocketAddr;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Pick up a local .env before anything reads the environment
    let dotenv = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fintech_chat=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    if let Ok(path) = &dotenv {
        tracing::info!(path = %path.display(), "Loaded .env");
    }

    // Configuration
    let port: u16 = std::env::var("CHAT_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8501);

    let llm_config = LlmConfig::from_env();
    if llm_config.api_key.is_none() {
        tracing::warn!("GOOGLE_API_KEY is not set; replies will carry the provider's error");
    }

    let service = llm::build_service(&llm_config)?;
    let completion = CompletionClient::new(service).with_max_tokens(llm_config.max_output_tokens);
    tracing::info!(model = %completion.model_id(), "Completion client initialized");

    let state = AppState::new(completion);

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new()
        .gzip(true)
        .br(true)
        .deflate(true)
        .zstd(true);

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(compression);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("FinTech Chatbot listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

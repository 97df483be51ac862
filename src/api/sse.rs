//! Server-Sent Events support
//!
//! Pushes transcript changes to the page instead of re-rendering on every
//! interaction.

use crate::chat::SessionEvent;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use serde_json::json;
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

/// Convert broadcast stream to SSE stream
pub fn sse_stream(
    init_event: SessionEvent,
    broadcast_rx: tokio::sync::broadcast::Receiver<SessionEvent>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    // Create stream that starts with init event then broadcasts
    let init = futures::stream::once(async move { Ok(session_event_to_axum(init_event)) });

    let broadcasts = BroadcastStream::new(broadcast_rx).filter_map(|result| match result {
        Ok(event) => Some(Ok(session_event_to_axum(event))),
        Err(_) => None, // Skip lagged messages
    });

    let combined = init.chain(broadcasts);

    Sse::new(combined).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

fn session_event_to_axum(event: SessionEvent) -> Event {
    let (event_type, data) = event_payload(event);
    Event::default().event(event_type).data(data.to_string())
}

fn event_payload(event: SessionEvent) -> (&'static str, serde_json::Value) {
    match event {
        SessionEvent::Init { turns, phase } => (
            "init",
            json!({
                "type": "init",
                "turns": turns,
                "phase": phase
            }),
        ),
        SessionEvent::Turn { index, turn } => (
            "turn",
            json!({
                "type": "turn",
                "index": index,
                "turn": turn
            }),
        ),
        SessionEvent::Phase { phase } => (
            "phase",
            json!({
                "type": "phase",
                "phase": phase
            }),
        ),
        SessionEvent::Ended => (
            "ended",
            json!({
                "type": "ended"
            }),
        ),
    }
}

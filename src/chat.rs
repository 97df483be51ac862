//! Conversation core
//!
//! A session owns an append-only transcript. Each admitted submission runs
//! one request cycle: append the user turn, ask the completion client for a
//! reply, append the reply (or the failure text) as the bot turn.

mod completion;
pub mod cycle;
mod event;
mod gate;
mod session;
mod sessions;
mod transcript;

#[cfg(test)]
mod proptests;
#[cfg(test)]
pub mod testing;

pub use completion::CompletionClient;
pub use cycle::CyclePhase;
pub use event::SessionEvent;
pub use gate::admit;
pub use session::{ChatSession, Submission};
pub use sessions::SessionManager;
pub use transcript::{Role, Transcript, Turn};

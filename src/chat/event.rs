//! Events pushed to connected renderers

use super::{CyclePhase, Turn};

/// Events broadcast by a session whenever its visible state changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Full snapshot, sent first to every new subscriber
    Init {
        turns: Vec<Turn>,
        phase: CyclePhase,
    },
    /// A turn was appended at `index`
    Turn { index: usize, turn: Turn },
    /// The request cycle moved to `phase`
    Phase { phase: CyclePhase },
    /// The session was ended; no further events follow
    Ended,
}

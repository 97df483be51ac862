//! Request cycle state machine
//!
//! `Idle -> Submitted -> AwaitingCompletion -> Rendered -> Idle`
//!
//! The transition function is pure; `ChatSession` owns the current phase and
//! applies steps as the cycle progresses.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where a session is within its request cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePhase {
    /// Waiting for user interaction
    #[default]
    Idle,
    /// Gate passed, user turn appended
    Submitted,
    /// Completion client invoked, reply pending
    AwaitingCompletion,
    /// Bot turn appended, renderers notified
    Rendered,
}

impl CyclePhase {
    pub fn as_str(self) -> &'static str {
        match self {
            CyclePhase::Idle => "idle",
            CyclePhase::Submitted => "submitted",
            CyclePhase::AwaitingCompletion => "awaiting_completion",
            CyclePhase::Rendered => "rendered",
        }
    }
}

/// Steps that drive the cycle forward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleStep {
    /// Submission admitted and user turn appended
    UserAppended,
    /// Remote call started
    CompletionStarted,
    /// Reply or failure text appended as the bot turn
    BotAppended,
    /// Renderers have been told about the new turn
    RenderDone,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid transition: {step:?} while {phase:?}")]
pub struct TransitionError {
    pub phase: CyclePhase,
    pub step: CycleStep,
}

/// Pure transition function
pub fn transition(phase: CyclePhase, step: CycleStep) -> Result<CyclePhase, TransitionError> {
    match (phase, step) {
        (CyclePhase::Idle, CycleStep::UserAppended) => Ok(CyclePhase::Submitted),
        (CyclePhase::Submitted, CycleStep::CompletionStarted) => {
            Ok(CyclePhase::AwaitingCompletion)
        }
        (CyclePhase::AwaitingCompletion, CycleStep::BotAppended) => Ok(CyclePhase::Rendered),
        (CyclePhase::Rendered, CycleStep::RenderDone) => Ok(CyclePhase::Idle),
        (phase, step) => Err(TransitionError { phase, step }),
    }
}

//! A single chat session

use super::cycle::{transition, CyclePhase, CycleStep};
use super::{admit, CompletionClient, SessionEvent, Transcript, Turn};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::{broadcast, Mutex};
use uuid::Uuid;

const EVENT_CAPACITY: usize = 64;

/// Outcome of a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Blocked by the submit gate; nothing was appended
    Blocked,
    /// One full cycle ran; both appended turns are returned
    Completed { user: Turn, bot: Turn },
}

#[derive(Debug, Default)]
struct SessionState {
    transcript: Transcript,
    phase: CyclePhase,
}

/// One browser session: its transcript, cycle phase and event channel.
///
/// Submissions are serialized by `cycle_lock`, so a session never has two
/// cycles in flight. Reads only take the short state lock and never wait on
/// a pending completion.
pub struct ChatSession {
    id: Uuid,
    state: RwLock<SessionState>,
    cycle_lock: Mutex<()>,
    events: broadcast::Sender<SessionEvent>,
}

impl ChatSession {
    pub fn new(id: Uuid) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            id,
            state: RwLock::new(SessionState::default()),
            cycle_lock: Mutex::new(()),
            events,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Snapshot of every turn, in order
    pub fn read_all(&self) -> Vec<Turn> {
        self.read_state().transcript.read_all().to_vec()
    }

    pub fn turn_count(&self) -> usize {
        self.read_state().transcript.len()
    }

    pub fn phase(&self) -> CyclePhase {
        self.read_state().phase
    }

    /// Subscribe to changes. The returned `Init` event and the receiver are
    /// taken under one lock, so no append can fall between them.
    pub fn subscribe(&self) -> (SessionEvent, broadcast::Receiver<SessionEvent>) {
        let state = self.read_state();
        let rx = self.events.subscribe();
        let init = SessionEvent::Init {
            turns: state.transcript.read_all().to_vec(),
            phase: state.phase,
        };
        (init, rx)
    }

    /// Run one request cycle for `input`.
    ///
    /// Blocks this session's cycle until the completion client returns.
    pub async fn submit(&self, completion: &CompletionClient, input: &str) -> Submission {
        let Some(text) = admit(input) else {
            tracing::debug!(session = %self.id, "Submission blocked by gate");
            return Submission::Blocked;
        };

        let _cycle = self.cycle_lock.lock().await;

        let user = self.record(Turn::user(text), CycleStep::UserAppended);
        self.advance(CycleStep::CompletionStarted);

        let reply = completion.reply(text).await;

        let bot = self.record(Turn::bot(reply), CycleStep::BotAppended);
        self.advance(CycleStep::RenderDone);

        Submission::Completed { user, bot }
    }

    /// Tell subscribers the session is over
    pub fn end(&self) {
        self.notify(SessionEvent::Ended);
    }

    /// Append a turn and take the matching step under one lock, so a
    /// snapshot never shows the turn without its phase.
    fn record(&self, turn: Turn, step: CycleStep) -> Turn {
        let mut state = self.write_state();
        let turn = self.push_turn(&mut state, turn);
        self.step(&mut state, step);
        turn
    }

    /// Add one turn at the end and notify subscribers
    fn push_turn(&self, state: &mut SessionState, turn: Turn) -> Turn {
        let index = state.transcript.append(turn.role, turn.content.clone());
        self.notify(SessionEvent::Turn {
            index,
            turn: turn.clone(),
        });
        turn
    }

    fn advance(&self, step: CycleStep) {
        let mut state = self.write_state();
        self.step(&mut state, step);
    }

    fn step(&self, state: &mut SessionState, step: CycleStep) {
        match transition(state.phase, step) {
            Ok(phase) => {
                state.phase = phase;
                tracing::debug!(session = %self.id, phase = phase.as_str(), "Request cycle advanced");
                self.notify(SessionEvent::Phase { phase });
            }
            Err(e) => {
                tracing::error!(session = %self.id, error = %e, "Request cycle out of step");
            }
        }
    }

    fn notify(&self, event: SessionEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    fn read_state(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

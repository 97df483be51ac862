//! Property-based tests for the request cycle
//!
//! These tests verify transcript invariants across arbitrary submission
//! sequences.

use super::testing::MockLlmService;
use super::*;
use crate::llm::LlmError;
use proptest::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

// ============================================================================
// Test Helpers
// ============================================================================

/// How the mocked provider answers one submission
#[derive(Debug, Clone)]
enum Answer {
    Text(String),
    Fail(String),
}

fn run<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_utterance() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9?*]{1,12}( [a-zA-Z0-9?*]{1,12}){0,4}"
}

fn arb_blank() -> impl Strategy<Value = String> {
    "[ \t\n]{0,6}"
}

fn arb_answer() -> impl Strategy<Value = Answer> {
    prop_oneof![
        3 => "[a-zA-Z0-9 ]{1,40}".prop_map(Answer::Text),
        1 => "[a-z ]{1,20}".prop_map(Answer::Fail),
    ]
}

fn arb_input() -> impl Strategy<Value = (String, Answer)> {
    prop_oneof![
        4 => (arb_utterance(), arb_answer()),
        1 => (arb_blank(), arb_answer()),
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_admitted_submissions_alternate(inputs in prop::collection::vec(arb_input(), 0..12)) {
        let mock = Arc::new(MockLlmService::new("mock"));
        let completion = CompletionClient::new(mock.clone());
        let session = ChatSession::new(Uuid::new_v4());

        let mut admitted = 0usize;
        for (text, answer) in &inputs {
            if admit(text).is_some() {
                admitted += 1;
                match answer {
                    Answer::Text(t) => mock.queue_text(t),
                    Answer::Fail(m) => mock.queue_error(LlmError::unknown(m.clone())),
                }
            }
        }

        run(async {
            for (text, _) in &inputs {
                session.submit(&completion, text).await;
            }
        });

        let turns = session.read_all();
        prop_assert_eq!(turns.len(), admitted * 2);
        for (i, turn) in turns.iter().enumerate() {
            let expected = if i % 2 == 0 { Role::User } else { Role::Bot };
            prop_assert_eq!(turn.role, expected);
        }
        prop_assert_eq!(session.phase(), CyclePhase::Idle);
    }

    #[test]
    fn prop_failures_surface_as_error_text(message in "[a-zA-Z ]{1,30}", text in arb_utterance()) {
        let mock = Arc::new(MockLlmService::new("mock"));
        mock.queue_error(LlmError::unknown(message.clone()));
        let completion = CompletionClient::new(mock.clone());
        let session = ChatSession::new(Uuid::new_v4());

        run(session.submit(&completion, &text));

        let turns = session.read_all();
        prop_assert_eq!(turns.len(), 2);
        prop_assert_eq!(turns[1].content.clone(), format!("Error: {message}"));
    }

    #[test]
    fn prop_blank_input_never_appends(text in arb_blank()) {
        let mock = Arc::new(MockLlmService::new("mock"));
        let completion = CompletionClient::new(mock.clone());
        let session = ChatSession::new(Uuid::new_v4());

        let outcome = run(session.submit(&completion, &text));

        prop_assert_eq!(outcome, Submission::Blocked);
        prop_assert!(session.read_all().is_empty());
        prop_assert!(mock.recorded_requests().is_empty());
    }

    #[test]
    fn prop_user_turns_record_trimmed_text(text in arb_utterance(), pad in arb_blank()) {
        let mock = Arc::new(MockLlmService::new("mock"));
        mock.queue_text("ok");
        let completion = CompletionClient::new(mock.clone());
        let session = ChatSession::new(Uuid::new_v4());

        run(session.submit(&completion, &format!("{pad}{text}{pad}")));

        prop_assert_eq!(session.read_all()[0].clone(), Turn::user(text.clone()));
        prop_assert_eq!(mock.recorded_prompts(), vec![text]);
    }
}

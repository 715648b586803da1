//! In-memory registration sessions.
//!
//! Each participant answers a fixed list of questions over private messages.
//! [`SessionTracker`] owns every in-flight session; a session disappears in
//! the same critical section that records its final answer.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::bot::platform::ParticipantId;

pub const QUESTION_COUNT: usize = 5;

pub const REGISTRATION_QUESTIONS: [&str; QUESTION_COUNT] = [
    "What is your full name?",
    "What is your email address?",
    "What is your phone number?",
    "Do you have any dietary restrictions?",
    "Any other comments?",
];

/// One participant's progress through the questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationSession {
    pub participant: ParticipantId,
    pub event_name: Option<String>,
    answers: Vec<String>,
}

impl RegistrationSession {
    fn new(participant: ParticipantId, event_name: Option<String>) -> Self {
        Self {
            participant,
            event_name,
            answers: Vec::with_capacity(QUESTION_COUNT),
        }
    }

    /// Index of the question currently awaiting an answer.
    pub fn step(&self) -> usize {
        self.answers.len()
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }
}

/// Finished registration, ready for the results feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedRegistration {
    pub participant: ParticipantId,
    pub event_name: Option<String>,
    /// `(question, answer)` pairs in question order.
    pub answers: Vec<(&'static str, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    /// The sender has no session; nothing was recorded.
    NoActiveSession,
    AwaitingNextQuestion(&'static str),
    Complete(CompletedRegistration),
}

pub struct SessionTracker {
    questions: [&'static str; QUESTION_COUNT],
    sessions: Mutex<HashMap<ParticipantId, RegistrationSession>>,
}

impl Default for SessionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionTracker {
    pub fn new() -> Self {
        Self::with_questions(REGISTRATION_QUESTIONS)
    }

    pub fn with_questions(questions: [&'static str; QUESTION_COUNT]) -> Self {
        Self {
            questions,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    // A panic while holding the lock cannot leave a half-written session
    // behind, so a poisoned map is still safe to use.
    fn lock(&self) -> MutexGuard<'_, HashMap<ParticipantId, RegistrationSession>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn first_question(&self) -> &'static str {
        self.questions[0]
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Starts a fresh session, replacing any session the participant already had.
    pub fn start_session(&self, participant: ParticipantId, event_name: Option<String>) {
        let replaced = self
            .lock()
            .insert(participant, RegistrationSession::new(participant, event_name))
            .is_some();
        if replaced {
            tracing::debug!("Restarted registration session for user {}", participant);
        }
    }

    pub fn record_answer(&self, participant: ParticipantId, text: &str) -> SessionStatus {
        let mut sessions = self.lock();

        let Some(session) = sessions.get_mut(&participant) else {
            return SessionStatus::NoActiveSession;
        };

        session.answers.push(text.to_string());
        let step = session.step();
        if step < self.questions.len() {
            return SessionStatus::AwaitingNextQuestion(self.questions[step]);
        }

        let Some(session) = sessions.remove(&participant) else {
            return SessionStatus::NoActiveSession;
        };
        SessionStatus::Complete(CompletedRegistration {
            participant,
            event_name: session.event_name,
            answers: self.questions.iter().copied().zip(session.answers).collect(),
        })
    }

    pub fn session(&self, participant: ParticipantId) -> Option<RegistrationSession> {
        self.lock().get(&participant).cloned()
    }

    pub fn active_sessions(&self) -> usize {
        self.lock().len()
    }
}

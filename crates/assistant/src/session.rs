//! One visitor's live chat session.

use parkguide_core::error::AssistantError;
use parkguide_core::{ChatHistory, Message, ParkInfo, SessionId};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::assistant::{AskOutcome, Assistant, normalize_question};

/// Holds a visitor's [`ChatHistory`] and enforces one turn at a time.
///
/// The question is visible in [`snapshot`](Self::snapshot) as soon as a turn
/// starts; the reply follows when the completion call settles. History locks
/// are never held across an `.await`.
pub struct AssistantSession {
    id: SessionId,
    assistant: Arc<Assistant>,
    history: RwLock<ChatHistory>,
    /// Held for the duration of a turn
    turn: tokio::sync::Mutex<()>,
    last_active: Mutex<Instant>,
}

impl std::fmt::Debug for AssistantSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistantSession")
            .field("id", &self.id)
            .field("messages", &self.snapshot().len())
            .field("busy", &self.is_busy())
            .finish_non_exhaustive()
    }
}

impl AssistantSession {
    pub fn new(assistant: Arc<Assistant>) -> Self {
        let id = SessionId::new();
        Self {
            history: RwLock::new(ChatHistory::for_session(id.clone())),
            id,
            assistant,
            turn: tokio::sync::Mutex::new(()),
            last_active: Mutex::new(Instant::now()),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// A copy of the history as it stands now.
    pub fn snapshot(&self) -> ChatHistory {
        self.history.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Whether a turn is in flight.
    pub fn is_busy(&self) -> bool {
        self.turn.try_lock().is_err()
    }

    /// Time since the session last started or finished a turn.
    pub fn idle_for(&self) -> Duration {
        self.last_active
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .elapsed()
    }

    pub(crate) fn last_active(&self) -> Instant {
        *self.last_active.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Ask a question, waiting behind any turn already in flight.
    pub async fn ask(&self, question: &str, info: &ParkInfo) -> Result<AskOutcome, AssistantError> {
        let question = normalize_question(question)?;
        let _turn = self.turn.lock().await;
        Ok(self.run_turn(question, info).await)
    }

    /// Ask a question, or fail with [`AssistantError::Busy`] if a turn is
    /// already in flight. A rejected call leaves the history untouched.
    pub async fn try_ask(
        &self,
        question: &str,
        info: &ParkInfo,
    ) -> Result<AskOutcome, AssistantError> {
        let question = normalize_question(question)?;
        let _turn = self.turn.try_lock().map_err(|_| {
            debug!(session = %self.id, "Rejected question while a turn is in flight");
            AssistantError::Busy
        })?;
        Ok(self.run_turn(question, info).await)
    }

    async fn run_turn(&self, question: &str, info: &ParkInfo) -> AskOutcome {
        self.touch();
        self.push(Message::user(question));
        info!(session = %self.id, "Assistant turn started");

        let (reply, diagnostic) = self.assistant.reply(question, info).await;

        let history = {
            let mut history = self.history.write().unwrap_or_else(|e| e.into_inner());
            history.push(reply);
            history.clone()
        };
        self.touch();

        AskOutcome {
            history,
            diagnostic,
        }
    }

    fn push(&self, message: Message) {
        self.history
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(message);
    }

    fn touch(&self) {
        *self.last_active.lock().unwrap_or_else(|e| e.into_inner()) = Instant::now();
    }
}

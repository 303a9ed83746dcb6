//! Message and chat history domain types.
//!
//! A visitor asks a question → the assistant appends the question and the
//! reply as a pair → the page renders the history in order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an assistant session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The role of a message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The park visitor
    User,
    /// The AI assistant
    Assistant,
}

/// A single chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique message ID
    pub id: String,

    /// Who sent this message
    pub role: Role,

    /// The text content
    pub content: String,

    /// Timestamp
    pub timestamp: DateTime<Utc>,
}

impl Message {
    fn with_role(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::with_role(Role::User, content)
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::with_role(Role::Assistant, content)
    }
}

/// The ordered chat history of one assistant session.
///
/// Append-only. After every completed turn the last two messages are a
/// `user` message followed by its `assistant` reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatHistory {
    /// Owning session
    pub id: SessionId,

    /// Messages in chronological turn order
    pub messages: Vec<Message>,

    /// When the history was created
    pub created_at: DateTime<Utc>,

    /// When the last message was added
    pub updated_at: DateTime<Utc>,
}

impl ChatHistory {
    /// Create a new empty history with a fresh session id.
    pub fn new() -> Self {
        Self::for_session(SessionId::new())
    }

    /// Create a new empty history owned by `id`.
    pub fn for_session(id: SessionId) -> Self {
        let now = Utc::now();
        Self {
            id,
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a message.
    pub fn push(&mut self, message: Message) {
        self.updated_at = Utc::now();
        self.messages.push(message);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Whether the last message is a user question still waiting for a reply.
    pub fn awaiting_reply(&self) -> bool {
        self.last().is_some_and(|m| m.role == Role::User)
    }
}

impl Default for ChatHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_user_message() {
        let msg = Message::user("Where is TRON?");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "Where is TRON?");
    }

    #[test]
    fn history_tracks_updates() {
        let mut history = ChatHistory::new();
        let created = history.created_at;

        history.push(Message::user("First question"));
        assert_eq!(history.len(), 1);
        assert!(history.updated_at >= created);
        assert!(history.awaiting_reply());

        history.push(Message::assistant("First answer"));
        assert!(!history.awaiting_reply());
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&Message::assistant("hi")).unwrap();
        assert!(json.contains(r#""role":"assistant""#));
    }

    #[test]
    fn empty_history_is_not_awaiting() {
        let history = ChatHistory::for_session(SessionId::from("abc"));
        assert!(history.is_empty());
        assert!(!history.awaiting_reply());
        assert_eq!(history.id.to_string(), "abc");
    }
}

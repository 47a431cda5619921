//! Conversation session: an append-only log of user/assistant turns.
//!
//! Owned by the interactive surface and passed explicitly into each query —
//! there is no ambient session singleton. The engine only consumes the
//! latest question; retrieval context is rebuilt fresh every turn, so prior
//! answers are displayed but never re-fed as evidence.

use serde::{Deserialize, Serialize};

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One conversation turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

/// Append-only turn history, scoped to one active dataset load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    turns: Vec<ConversationTurn>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user turn.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.turns.push(ConversationTurn {
            role: Role::User,
            content: content.into(),
        });
    }

    /// Append an assistant turn.
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.turns.push(ConversationTurn {
            role: Role::Assistant,
            content: content.into(),
        });
    }

    /// All turns, in order.
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The most recent user utterance, if any.
    pub fn latest_question(&self) -> Option<&str> {
        self.turns
            .iter()
            .rev()
            .find(|turn| turn.role == Role::User)
            .map(|turn| turn.content.as_str())
    }
}

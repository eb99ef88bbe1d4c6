//! Conversation state
//!
//! An ordered, append-only sequence of turns. The first turn is the system
//! turn, set once when the session starts.

use shellwright_llm::{Message, MessageRole};
use uuid::Uuid;

/// Conversation log for one session
#[derive(Debug, Clone)]
pub struct Conversation {
    session_id: Uuid,
    turns: Vec<Message>,
}

impl Conversation {
    /// Start a session with its system turn
    #[must_use]
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            turns: vec![Message::system(system_prompt)],
        }
    }

    /// Session id used in logs
    #[must_use]
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Append a turn
    pub fn push(&mut self, turn: Message) {
        self.turns.push(turn);
    }

    /// All turns, oldest first
    #[must_use]
    pub fn turns(&self) -> &[Message] {
        &self.turns
    }

    /// Most recent turn
    #[must_use]
    pub fn last(&self) -> Option<&Message> {
        self.turns.last()
    }

    /// Number of turns, including the system turn
    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Always false; the system turn is present from the start
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Content of the system turn
    #[must_use]
    pub fn system_prompt(&self) -> &str {
        self.turns
            .first()
            .filter(|m| m.role == MessageRole::System)
            .map_or("", |m| m.content.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_system_turn() {
        let conv = Conversation::new("be terse");

        assert_eq!(conv.len(), 1);
        assert!(!conv.is_empty());
        assert_eq!(conv.turns()[0].role, MessageRole::System);
        assert_eq!(conv.system_prompt(), "be terse");
    }

    #[test]
    fn test_push_appends_in_order() {
        let mut conv = Conversation::new("sys");
        conv.push(Message::user("one"));
        conv.push(Message::assistant("two"));

        let roles: Vec<_> = conv.turns().iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![MessageRole::System, MessageRole::User, MessageRole::Assistant]
        );
        assert_eq!(conv.last().unwrap().content, "two");
        assert_eq!(conv.system_prompt(), "sys");
    }

    #[test]
    fn test_session_ids_differ() {
        assert_ne!(
            Conversation::new("a").session_id(),
            Conversation::new("a").session_id()
        );
    }
}

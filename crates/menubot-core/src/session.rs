//! In-memory conversation state table.
//!
//! Maps chat identity to the session describing what input that chat is
//! expected to provide next. Single-process and non-persistent: a restart
//! drops all in-flight flows, which is acceptable because flows are short
//! and user-resumable by re-issuing the starting command.
//!
//! Access is last-write-wins; ordering of events for the same chat is the
//! dispatcher's responsibility.

use dashmap::DashMap;
use menubot_types::event::ChatId;
use menubot_types::session::Session;

/// Concurrent chat-to-session map, exclusively owned by the dispatcher.
pub struct SessionTable {
    sessions: DashMap<ChatId, Session>,
}

impl SessionTable {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Current session for a chat, if any.
    pub fn get(&self, chat: ChatId) -> Option<Session> {
        self.sessions.get(&chat).map(|entry| entry.value().clone())
    }

    /// Replace (or create) the session for a chat.
    pub fn set(&self, chat: ChatId, session: Session) {
        self.sessions.insert(chat, session);
    }

    /// Remove the session for a chat, returning the removed session.
    pub fn clear(&self, chat: ChatId) -> Option<Session> {
        self.sessions.remove(&chat).map(|(_, session)| session)
    }

    /// Number of chats currently holding a session.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for SessionTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SessionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTable")
            .field("active_sessions", &self.sessions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menubot_types::session::FlowState;

    #[test]
    fn test_get_set_clear() {
        let table = SessionTable::new();
        let chat = ChatId(1);
        assert!(table.get(chat).is_none());
        assert!(table.is_empty());

        table.set(chat, Session::new(FlowState::AwaitingCategory));
        assert!(matches!(
            table.get(chat).unwrap().step,
            FlowState::AwaitingCategory
        ));
        assert_eq!(table.len(), 1);

        let removed = table.clear(chat).unwrap();
        assert!(matches!(removed.step, FlowState::AwaitingCategory));
        assert!(table.get(chat).is_none());
    }

    #[test]
    fn test_last_write_wins() {
        let table = SessionTable::new();
        let chat = ChatId(7);
        table.set(chat, Session::new(FlowState::AwaitingCategory));
        table.set(
            chat,
            Session::new(FlowState::AwaitingName {
                category: "Travel".to_string(),
            }),
        );
        assert!(matches!(
            table.get(chat).unwrap().step,
            FlowState::AwaitingName { .. }
        ));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_chats_are_independent() {
        let table = SessionTable::new();
        table.set(ChatId(1), Session::new(FlowState::AwaitingCategory));
        table.set(
            ChatId(2),
            Session::new(FlowState::AwaitingName {
                category: "Guides".to_string(),
            }),
        );
        table.clear(ChatId(1));
        assert!(table.get(ChatId(2)).is_some());
    }
}

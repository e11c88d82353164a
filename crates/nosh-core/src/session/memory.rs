//! In-memory session store backed by `DashMap`.
//!
//! The map is sharded, so upserts for different chats rarely contend.
//! Values are cloned on read; a `DashMap` guard never escapes a method,
//! which keeps it from being held across an `.await`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use nosh_types::chat::{ChatId, ChatSession, Command, ConversationState};
use nosh_types::message::Coordinates;

use super::store::SessionStore;

/// Process-lifetime session store.
///
/// Cloning produces a shared view of the same map.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    inner: Arc<DashMap<ChatId, ChatSession>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn upsert(&self, chat_id: ChatId, update: impl FnOnce(&mut ChatSession)) {
        let mut entry = self
            .inner
            .entry(chat_id)
            .or_insert_with(|| ChatSession::new(chat_id));
        update(entry.value_mut());
        entry.updated_at = Utc::now();
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, chat_id: ChatId) -> Option<ChatSession> {
        self.inner.get(&chat_id).map(|r| r.value().clone())
    }

    fn upsert_last_command(&self, chat_id: ChatId, command: Command) {
        self.upsert(chat_id, |s| s.last_command = Some(command));
    }

    fn upsert_last_search_term(&self, chat_id: ChatId, term: String) {
        self.upsert(chat_id, |s| s.last_search_term = Some(term));
    }

    fn upsert_location(&self, chat_id: ChatId, location: Coordinates) {
        self.upsert(chat_id, |s| s.last_location = Some(location));
    }

    fn set_state(&self, chat_id: ChatId, state: ConversationState) {
        self.upsert(chat_id, |s| s.state = state);
    }

    fn evict_idle(&self, cutoff: DateTime<Utc>) -> usize {
        let before = self.inner.len();
        self.inner.retain(|_, session| session.updated_at >= cutoff);
        before.saturating_sub(self.inner.len())
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}

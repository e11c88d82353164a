//! SessionStore trait definition.

use chrono::{DateTime, Utc};
use nosh_types::chat::{ChatId, ChatSession, Command, ConversationState};
use nosh_types::message::Coordinates;

/// Concurrency-safe storage of chat sessions keyed by chat ID.
///
/// Every upsert creates the session if it does not exist yet and otherwise
/// changes only the targeted field. Reads return an owned snapshot so no
/// lock is held by the caller.
pub trait SessionStore: Send + Sync {
    /// Snapshot of the session for `chat_id`, or `None` if it was never seen.
    fn get(&self, chat_id: ChatId) -> Option<ChatSession>;

    fn upsert_last_command(&self, chat_id: ChatId, command: Command);

    fn upsert_last_search_term(&self, chat_id: ChatId, term: String);

    fn upsert_location(&self, chat_id: ChatId, location: Coordinates);

    fn set_state(&self, chat_id: ChatId, state: ConversationState);

    /// Drop sessions last updated before `cutoff`. Returns how many were removed.
    fn evict_idle(&self, cutoff: DateTime<Utc>) -> usize;

    /// Number of sessions held.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

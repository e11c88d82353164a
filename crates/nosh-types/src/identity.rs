//! The bot's public identity, used in the greeting.

use serde::{Deserialize, Serialize};

/// Name and handle of the bot as registered with the messaging platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotIdentity {
    /// Platform user ID of the bot account.
    pub id: i64,
    /// Display name (Telegram `first_name`).
    pub name: String,
    /// Username without the leading `@`.
    pub handle: String,
}

impl BotIdentity {
    pub fn new(id: i64, name: impl Into<String>, handle: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            handle: handle.into(),
        }
    }
}

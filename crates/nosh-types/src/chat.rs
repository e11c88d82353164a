//! Chat command and per-chat session types for Nosh.
//!
//! A `ChatSession` is the conversational memory the engine keeps for one
//! Telegram chat: the last command it saw, the search term waiting for a
//! location, and where the conversation currently stands.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::message::Coordinates;

/// Platform-assigned identifier of a conversation thread.
pub type ChatId = i64;

/// Leading character that distinguishes a command token from ordinary text.
pub const COMMAND_MARKER: char = '/';

/// A classified command token.
///
/// Recognized commands get their own variant; anything else keeps the raw
/// token in `Unknown` so the session can still record what was sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    Start,
    Help,
    Search,
    Random,
    Unknown(String),
}

impl Command {
    /// Classify a raw command token that carries no bot addressing.
    ///
    /// A token with an `@handle` suffix is never recognized here; use
    /// [`Command::classify_for`] when the bot's own handle is known.
    pub fn classify(token: &str) -> Self {
        Self::classify_for(token, None)
    }

    /// Classify a raw command token on behalf of the bot `own_handle`.
    ///
    /// Telegram group chats address commands as `/search@nosh_bot`. The
    /// suffix is dropped only when it names this bot (case-insensitive);
    /// a command addressed to another bot stays `Unknown`.
    pub fn classify_for(token: &str, own_handle: Option<&str>) -> Self {
        let bare = match (token.split_once('@'), own_handle) {
            (Some((command, handle)), Some(own))
                if command.starts_with(COMMAND_MARKER) && handle.eq_ignore_ascii_case(own) =>
            {
                command
            }
            _ => token,
        };

        match bare {
            "/start" => Command::Start,
            "/help" => Command::Help,
            "/search" => Command::Search,
            "/random" => Command::Random,
            _ => Command::Unknown(token.to_string()),
        }
    }

    /// Whether this command asks the user for a location to finish a search.
    pub fn triggers_search(&self) -> bool {
        matches!(self, Command::Search | Command::Random)
    }

    /// Whether the raw token looked like a command (contains the marker).
    pub fn is_command_like(&self) -> bool {
        match self {
            Command::Unknown(token) => token.contains(COMMAND_MARKER),
            _ => true,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Start => write!(f, "/start"),
            Command::Help => write!(f, "/help"),
            Command::Search => write!(f, "/search"),
            Command::Random => write!(f, "/random"),
            Command::Unknown(token) => write!(f, "{token}"),
        }
    }
}

impl FromStr for Command {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Command::classify(s))
    }
}

/// Where a chat's conversation stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    /// No pending location request.
    #[default]
    Idle,
    /// The bot asked the user to share coordinates to finish a search.
    AwaitingLocation,
}

impl fmt::Display for ConversationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversationState::Idle => write!(f, "idle"),
            ConversationState::AwaitingLocation => write!(f, "awaiting_location"),
        }
    }
}

/// Per-chat conversational memory.
///
/// Created lazily by the session store on the first upsert for a chat and
/// kept for the lifetime of the process (unless idle eviction is enabled).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    pub chat_id: ChatId,
    pub last_command: Option<Command>,
    pub last_search_term: Option<String>,
    pub last_location: Option<Coordinates>,
    pub state: ConversationState,
    pub updated_at: DateTime<Utc>,
}

impl ChatSession {
    /// An empty session for `chat_id`.
    pub fn new(chat_id: ChatId) -> Self {
        Self {
            chat_id,
            last_command: None,
            last_search_term: None,
            last_location: None,
            state: ConversationState::Idle,
            updated_at: Utc::now(),
        }
    }

    /// The cached search term, if the session is waiting on a location for it.
    ///
    /// Only trusted when the last command was search-triggering and the
    /// conversation is still awaiting a location.
    pub fn pending_search_term(&self) -> Option<&str> {
        let triggered = self
            .last_command
            .as_ref()
            .is_some_and(Command::triggers_search);

        if triggered && self.state == ConversationState::AwaitingLocation {
            self.last_search_term.as_deref()
        } else {
            None
        }
    }
}

//! Inbound and outbound message types.
//!
//! These are platform-neutral: the Telegram client in `nosh-infra` decodes
//! updates into `InboundMessage` and encodes `OutboundMessage` into
//! `sendMessage` requests.

use serde::{Deserialize, Serialize};

use std::fmt;

use crate::chat::ChatId;

/// Label on the keyboard button that asks the user for their location.
pub const LOCATION_BUTTON_LABEL: &str = "Provide Location";

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.latitude, self.longitude)
    }
}

/// A message received from a chat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub chat_id: ChatId,
    pub message_id: i64,
    /// Sender user ID. Absent for channel posts.
    pub sender_id: Option<i64>,
    /// Free-text body; empty for location shares and media.
    pub text: String,
    pub location: Option<Coordinates>,
}

impl InboundMessage {
    /// A text message.
    pub fn text(chat_id: ChatId, message_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            message_id,
            sender_id: None,
            text: text.into(),
            location: None,
        }
    }

    /// A location share with no text.
    pub fn location(chat_id: ChatId, message_id: i64, location: Coordinates) -> Self {
        Self {
            chat_id,
            message_id,
            sender_id: None,
            text: String::new(),
            location: Some(location),
        }
    }

    /// Set the sender user ID.
    pub fn with_sender(mut self, sender_id: i64) -> Self {
        self.sender_id = Some(sender_id);
        self
    }

    /// Coordinates of a message that carries only a location.
    pub fn shared_location(&self) -> Option<Coordinates> {
        if self.text.trim().is_empty() {
            self.location
        } else {
            None
        }
    }
}

/// Text formatting mode for an outbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseMode {
    Markdown,
}

impl fmt::Display for ParseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseMode::Markdown => write!(f, "Markdown"),
        }
    }
}

/// Interactive keyboard attached to a reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Keyboard {
    /// A single button that shares the user's location when pressed.
    RequestLocation { label: String },
    /// Dismiss a previously shown keyboard.
    Remove,
}

impl Keyboard {
    pub fn request_location() -> Self {
        Keyboard::RequestLocation {
            label: LOCATION_BUTTON_LABEL.to_string(),
        }
    }
}

/// A reply ready to hand to the messaging platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub chat_id: ChatId,
    pub text: String,
    pub reply_to_message_id: Option<i64>,
    pub parse_mode: Option<ParseMode>,
    pub keyboard: Option<Keyboard>,
}

impl OutboundMessage {
    /// A plain-text message with no threading or keyboard.
    pub fn new(chat_id: ChatId, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            reply_to_message_id: None,
            parse_mode: None,
            keyboard: None,
        }
    }

    pub fn reply_to(mut self, message_id: i64) -> Self {
        self.reply_to_message_id = Some(message_id);
        self
    }

    pub fn with_parse_mode(mut self, mode: ParseMode) -> Self {
        self.parse_mode = Some(mode);
        self
    }

    pub fn with_keyboard(mut self, keyboard: Keyboard) -> Self {
        self.keyboard = Some(keyboard);
        self
    }

    /// Whether the message asks the user to share their location.
    pub fn requests_location(&self) -> bool {
        matches!(self.keyboard, Some(Keyboard::RequestLocation { .. }))
    }
}

//! Telegram Bot API request/response types.
//!
//! Only the fields Nosh reads or writes are modelled; serde ignores the
//! rest of Telegram's payloads.

use serde::{Deserialize, Serialize};

use nosh_types::identity::BotIdentity;
use nosh_types::message::{Coordinates, InboundMessage, Keyboard, OutboundMessage};

// ---------------------------------------------------------------------------
// Response envelope
// ---------------------------------------------------------------------------

/// Every Bot API method answers with this envelope.
#[derive(Debug, Deserialize)]
pub struct TelegramResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Inbound
// ---------------------------------------------------------------------------

/// A webhook delivery.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

impl Update {
    /// The engine-facing view of this update, if it carries a message.
    pub fn into_inbound(self) -> Option<InboundMessage> {
        self.message.map(Message::into_inbound)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    #[serde(default)]
    pub from: Option<User>,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub location: Option<Location>,
}

impl Message {
    pub fn into_inbound(self) -> InboundMessage {
        InboundMessage {
            chat_id: self.chat.id,
            message_id: self.message_id,
            sender_id: self.from.map(|u| u.id),
            text: self.text.unwrap_or_default(),
            location: self
                .location
                .map(|l| Coordinates::new(l.latitude, l.longitude)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    #[serde(default)]
    pub username: Option<String>,
}

impl From<User> for BotIdentity {
    fn from(user: User) -> Self {
        BotIdentity::new(user.id, user.first_name, user.username.unwrap_or_default())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

// ---------------------------------------------------------------------------
// Outbound
// ---------------------------------------------------------------------------

/// Body of `sendMessage`.
#[derive(Debug, Serialize)]
pub struct SendMessageRequest<'a> {
    pub chat_id: i64,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_message_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<ReplyMarkup>,
}

impl<'a> From<&'a OutboundMessage> for SendMessageRequest<'a> {
    fn from(message: &'a OutboundMessage) -> Self {
        Self {
            chat_id: message.chat_id,
            text: &message.text,
            reply_to_message_id: message.reply_to_message_id,
            parse_mode: message.parse_mode.map(|m| m.to_string()),
            reply_markup: message.keyboard.as_ref().map(ReplyMarkup::from),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ReplyMarkup {
    Keyboard(ReplyKeyboardMarkup),
    Remove(ReplyKeyboardRemove),
}

impl From<&Keyboard> for ReplyMarkup {
    fn from(keyboard: &Keyboard) -> Self {
        match keyboard {
            Keyboard::RequestLocation { label } => ReplyMarkup::Keyboard(ReplyKeyboardMarkup {
                keyboard: vec![vec![KeyboardButton {
                    text: label.clone(),
                    request_location: true,
                }]],
                resize_keyboard: true,
                one_time_keyboard: true,
            }),
            Keyboard::Remove => ReplyMarkup::Remove(ReplyKeyboardRemove {
                remove_keyboard: true,
            }),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReplyKeyboardMarkup {
    pub keyboard: Vec<Vec<KeyboardButton>>,
    pub resize_keyboard: bool,
    pub one_time_keyboard: bool,
}

#[derive(Debug, Serialize)]
pub struct KeyboardButton {
    pub text: String,
    pub request_location: bool,
}

#[derive(Debug, Serialize)]
pub struct ReplyKeyboardRemove {
    pub remove_keyboard: bool,
}

/// Body of `setWebhook`.
#[derive(Debug, Serialize)]
pub struct SetWebhookRequest<'a> {
    pub url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_token: Option<&'a str>,
    pub allowed_updates: Vec<&'static str>,
}

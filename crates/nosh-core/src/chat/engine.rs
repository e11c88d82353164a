//! Conversation engine: the per-chat state machine.
//!
//! For each inbound message the engine reads the chat's session, decides
//! between a greeting, a location request, a provider search, or a hint,
//! writes the session changes back, and returns the reply. Processing for
//! one chat is serialized through a striped async lock so concurrent
//! deliveries for the same chat cannot interleave their read-modify-write.

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use nosh_types::chat::{ChatId, ChatSession, Command, ConversationState};
use nosh_types::identity::BotIdentity;
use nosh_types::message::{Coordinates, InboundMessage, Keyboard, OutboundMessage};

use super::parser::{self, ParsedCommand};
use super::{cuisine, format, query, replies};
use crate::search::SearchProvider;
use crate::session::SessionStore;

/// Number of lock stripes chats are spread across.
const LOCK_STRIPES: usize = 64;

/// Session changes produced by handling one message.
#[derive(Debug)]
struct Transition {
    reply: OutboundMessage,
    state: ConversationState,
    search_term: Option<String>,
    location: Option<Coordinates>,
}

impl Transition {
    fn idle(reply: OutboundMessage) -> Self {
        Self {
            reply,
            state: ConversationState::Idle,
            search_term: None,
            location: None,
        }
    }

    fn awaiting_location(chat_id: ChatId, term: String) -> Self {
        let reply = OutboundMessage::new(chat_id, replies::SHARE_LOCATION)
            .with_keyboard(Keyboard::request_location());
        Self {
            reply,
            state: ConversationState::AwaitingLocation,
            search_term: Some(term),
            location: None,
        }
    }

    fn with_term(mut self, term: String) -> Self {
        self.search_term = Some(term);
        self
    }

    fn with_location(mut self, location: Coordinates) -> Self {
        self.location = Some(location);
        self
    }
}

/// Runs the command language against per-chat sessions.
///
/// Generic over `SearchProvider` and `SessionStore` so the core never
/// depends on a concrete HTTP client or storage backend.
pub struct ConversationEngine<P: SearchProvider, S: SessionStore> {
    provider: P,
    sessions: S,
    identity: BotIdentity,
    stripes: Vec<Mutex<()>>,
}

impl<P: SearchProvider, S: SessionStore> ConversationEngine<P, S> {
    pub fn new(provider: P, sessions: S, identity: BotIdentity) -> Self {
        Self {
            provider,
            sessions,
            identity,
            stripes: (0..LOCK_STRIPES).map(|_| Mutex::new(())).collect(),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn sessions(&self) -> &S {
        &self.sessions
    }

    pub fn identity(&self) -> &BotIdentity {
        &self.identity
    }

    /// Handle one inbound message and build the reply.
    ///
    /// Never fails: provider errors become the fixed failure reply, and a
    /// missing session reads as an empty one. The reply is threaded to the
    /// inbound message.
    pub async fn respond(&self, inbound: &InboundMessage) -> OutboundMessage {
        let _guard = self.stripe(inbound.chat_id).lock().await;

        let parsed = parser::parse_for(&inbound.text, Some(self.identity.handle.as_str()));
        let session = self.sessions.get(inbound.chat_id);
        let state = session.as_ref().map(|s| s.state).unwrap_or_default();

        debug!(
            chat_id = inbound.chat_id,
            message_id = inbound.message_id,
            command = %parsed.command,
            remainder = %parsed.remainder,
            state = %state,
            "Parsed inbound message"
        );

        let pending = session.as_ref().and_then(ChatSession::pending_search_term);
        let transition = match (inbound.shared_location(), pending) {
            (Some(location), Some(term)) => self.resolve_location(inbound, term, location).await,
            _ => self.dispatch(inbound, &parsed).await,
        };

        self.apply(inbound.chat_id, parsed.command, transition)
            .reply_to(inbound.message_id)
    }

    async fn dispatch(&self, inbound: &InboundMessage, parsed: &ParsedCommand) -> Transition {
        let chat_id = inbound.chat_id;

        match &parsed.command {
            Command::Start | Command::Help => Transition::idle(OutboundMessage::new(
                chat_id,
                replies::greeting(&self.identity),
            )),
            Command::Search => self.search(inbound, &parsed.remainder).await,
            Command::Random => {
                let term = cuisine::random_cuisine();
                info!(chat_id, term, "Picked random cuisine");
                Transition::awaiting_location(chat_id, term.to_string())
            }
            Command::Unknown(token) => {
                if inbound.shared_location().is_some() {
                    info!(
                        chat_id,
                        message_id = inbound.message_id,
                        "Location received with no pending search"
                    );
                }
                let text = if parsed.command.is_command_like() {
                    replies::UNKNOWN_COMMAND
                } else {
                    replies::BAD_COMMAND
                };
                debug!(chat_id, token = %token, "Unrecognized input");
                Transition::idle(OutboundMessage::new(chat_id, text))
            }
        }
    }

    async fn search(&self, inbound: &InboundMessage, remainder: &str) -> Transition {
        let chat_id = inbound.chat_id;
        let parsed = query::extract(remainder);

        let term = parsed
            .term
            .as_deref()
            .unwrap_or(remainder)
            .trim()
            .to_string();
        let location = parsed
            .location
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty());

        match location {
            Some(location) if !parsed.near_me => {
                info!(chat_id, term = %term, location, "Searching by location");
                let reply = match self.provider.search_by_location(&term, location).await {
                    Ok(result) => {
                        info!(chat_id, total = result.total, "Search succeeded");
                        format::results_message(chat_id, &term, &result)
                    }
                    Err(e) => {
                        warn!(
                            chat_id,
                            message_id = inbound.message_id,
                            provider = self.provider.name(),
                            error = %e,
                            "Search by location failed"
                        );
                        format::failure_message(chat_id)
                    }
                };
                Transition::idle(reply).with_term(term)
            }
            _ if term.is_empty() => {
                Transition::idle(OutboundMessage::new(chat_id, replies::SEARCH_USAGE))
            }
            _ => {
                info!(chat_id, term = %term, "Requesting location for search");
                Transition::awaiting_location(chat_id, term)
            }
        }
    }

    async fn resolve_location(
        &self,
        inbound: &InboundMessage,
        term: &str,
        location: Coordinates,
    ) -> Transition {
        let chat_id = inbound.chat_id;
        info!(
            chat_id,
            message_id = inbound.message_id,
            latitude = location.latitude,
            longitude = location.longitude,
            term,
            "Got user's location, searching by coordinates"
        );

        let reply = match self.provider.search_by_coordinates(term, location).await {
            Ok(result) => {
                info!(chat_id, total = result.total, "Search succeeded");
                format::results_message(chat_id, term, &result)
            }
            Err(e) => {
                warn!(
                    chat_id,
                    message_id = inbound.message_id,
                    provider = self.provider.name(),
                    error = %e,
                    "Search by coordinates failed"
                );
                format::failure_message(chat_id)
            }
        };

        Transition::idle(reply).with_location(location)
    }

    /// Write the transition to the session store. The command is recorded
    /// last, whatever branch ran.
    fn apply(&self, chat_id: ChatId, command: Command, transition: Transition) -> OutboundMessage {
        if let Some(term) = transition.search_term {
            self.sessions.upsert_last_search_term(chat_id, term);
        }
        if let Some(location) = transition.location {
            self.sessions.upsert_location(chat_id, location);
        }
        self.sessions.set_state(chat_id, transition.state);
        self.sessions.upsert_last_command(chat_id, command);

        transition.reply
    }

    fn stripe(&self, chat_id: ChatId) -> &Mutex<()> {
        let idx = chat_id.rem_euclid(LOCK_STRIPES as i64) as usize;
        &self.stripes[idx]
    }
}

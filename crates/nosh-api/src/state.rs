//! Application state shared by the webhook handlers.
//!
//! `AppState` is generic over the engine's collaborators so router tests can
//! plug in fakes; `LiveState` pins it to the Yelp and Telegram clients.

use std::sync::Arc;

use nosh_core::chat::replies;
use nosh_core::chat::service::RelayService;
use nosh_core::messenger::Messenger;
use nosh_core::search::SearchProvider;
use nosh_core::session::{InMemorySessionStore, SessionStore};
use nosh_infra::telegram::TelegramClient;
use nosh_infra::yelp::YelpClient;
use nosh_types::config::NoshConfig;

/// Relay pinned to the production collaborators.
pub type LiveRelay = RelayService<YelpClient, InMemorySessionStore, TelegramClient>;

pub type LiveState = AppState<YelpClient, InMemorySessionStore, TelegramClient>;

/// Shared state handed to every handler.
pub struct AppState<P: SearchProvider, S: SessionStore, M: Messenger> {
    pub relay: Arc<RelayService<P, S, M>>,
    pub config: Arc<NoshConfig>,
    /// Greeting text, rendered once from the bot identity.
    pub greeting: Arc<str>,
}

impl<P: SearchProvider, S: SessionStore, M: Messenger> AppState<P, S, M> {
    pub fn new(relay: RelayService<P, S, M>, config: NoshConfig) -> Self {
        let greeting = replies::greeting(relay.engine().identity());
        Self {
            relay: Arc::new(relay),
            config: Arc::new(config),
            greeting: Arc::from(greeting),
        }
    }

    /// Configured webhook secret, if any.
    pub fn webhook_secret(&self) -> Option<&str> {
        self.config.webhook.secret_token.as_deref()
    }
}

// Manual impl: cloning only bumps the Arcs, so the collaborators need not be Clone.
impl<P: SearchProvider, S: SessionStore, M: Messenger> Clone for AppState<P, S, M> {
    fn clone(&self) -> Self {
        Self {
            relay: Arc::clone(&self.relay),
            config: Arc::clone(&self.config),
            greeting: Arc::clone(&self.greeting),
        }
    }
}

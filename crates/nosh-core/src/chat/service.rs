//! Relay service: engine in, messenger out.
//!
//! `RelayService` runs one inbound message through the conversation engine
//! and hands the reply to the messenger. Delivery is attempted exactly once;
//! a failure is logged with the chat and message IDs and reported to the
//! caller so the webhook can answer with a server error.

use thiserror::Error;
use tracing::{info, warn};

use nosh_types::error::MessengerError;
use nosh_types::message::{InboundMessage, OutboundMessage};

use super::engine::ConversationEngine;
use crate::messenger::Messenger;
use crate::search::SearchProvider;
use crate::session::SessionStore;

/// Errors surfaced to the webhook handler.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("failed to deliver reply to chat {chat_id}: {source}")]
    Delivery {
        chat_id: i64,
        #[source]
        source: MessengerError,
    },
}

/// Orchestrates reply generation and delivery for one message at a time.
pub struct RelayService<P: SearchProvider, S: SessionStore, M: Messenger> {
    engine: ConversationEngine<P, S>,
    messenger: M,
}

impl<P: SearchProvider, S: SessionStore, M: Messenger> RelayService<P, S, M> {
    pub fn new(engine: ConversationEngine<P, S>, messenger: M) -> Self {
        Self { engine, messenger }
    }

    pub fn engine(&self) -> &ConversationEngine<P, S> {
        &self.engine
    }

    pub fn messenger(&self) -> &M {
        &self.messenger
    }

    /// Build the reply for `inbound` and send it.
    ///
    /// Returns the reply that was delivered.
    pub async fn handle(&self, inbound: &InboundMessage) -> Result<OutboundMessage, RelayError> {
        info!(
            chat_id = inbound.chat_id,
            message_id = inbound.message_id,
            sender_id = inbound.sender_id,
            text = %inbound.text,
            has_location = inbound.location.is_some(),
            "Got message"
        );

        let reply = self.engine.respond(inbound).await;

        match self.messenger.send(&reply).await {
            Ok(()) => {
                info!(
                    chat_id = reply.chat_id,
                    reply_to = reply.reply_to_message_id,
                    keyboard = reply.keyboard.is_some(),
                    "Reply delivered"
                );
                Ok(reply)
            }
            Err(e) => {
                warn!(
                    chat_id = inbound.chat_id,
                    message_id = inbound.message_id,
                    error = %e,
                    "Failed to deliver reply"
                );
                Err(RelayError::Delivery {
                    chat_id: inbound.chat_id,
                    source: e,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{Arc, Mutex};

    use nosh_types::message::Coordinates;

    use crate::chat::engine::tests::{identity, FakeProvider};
    use crate::chat::replies;
    use crate::session::InMemorySessionStore;

    /// Collects sent messages; optionally rejects every send.
    #[derive(Clone, Default)]
    struct FakeMessenger {
        sent: Arc<Mutex<Vec<OutboundMessage>>>,
        reject: bool,
    }

    impl FakeMessenger {
        fn sent(&self) -> Vec<OutboundMessage> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl Messenger for FakeMessenger {
        async fn send(&self, message: &OutboundMessage) -> Result<(), MessengerError> {
            if self.reject {
                return Err(MessengerError::Rejected {
                    method: "sendMessage".to_string(),
                    description: "Forbidden: bot was blocked by the user".to_string(),
                });
            }
            self.sent.lock().unwrap().push(message.clone());
            Ok(())
        }
    }

    fn relay(messenger: FakeMessenger) -> RelayService<FakeProvider, InMemorySessionStore, FakeMessenger> {
        let engine =
            ConversationEngine::new(FakeProvider::default(), InMemorySessionStore::new(), identity());
        RelayService::new(engine, messenger)
    }

    #[tokio::test]
    async fn delivers_exactly_one_reply_per_message() {
        let messenger = FakeMessenger::default();
        let relay = relay(messenger.clone());

        relay
            .handle(&InboundMessage::text(1, 10, "/search sushi nearby"))
            .await
            .unwrap();
        relay
            .handle(&InboundMessage::location(1, 11, Coordinates::new(1.0, 2.0)))
            .await
            .unwrap();

        let sent = messenger.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].text, replies::SHARE_LOCATION);
        assert_eq!(sent[0].reply_to_message_id, Some(10));
        assert_eq!(sent[1].reply_to_message_id, Some(11));
        assert_eq!(relay.engine().provider().calls().len(), 1);
    }

    #[tokio::test]
    async fn delivery_failure_is_reported() {
        let relay = relay(FakeMessenger {
            reject: true,
            ..FakeMessenger::default()
        });

        let err = relay
            .handle(&InboundMessage::text(3, 1, "/start"))
            .await
            .unwrap_err();
        assert!(matches!(err, RelayError::Delivery { chat_id: 3, .. }));
        assert!(err.to_string().contains("bot was blocked"));
    }

    #[tokio::test]
    async fn session_updates_even_when_delivery_fails() {
        let relay = relay(FakeMessenger {
            reject: true,
            ..FakeMessenger::default()
        });

        let _ = relay.handle(&InboundMessage::text(3, 1, "/random")).await;
        let session = relay.engine().sessions().get(3).unwrap();
        assert!(session.pending_search_term().is_some());
    }
}

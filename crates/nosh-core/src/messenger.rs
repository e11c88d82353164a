//! Messenger trait: the outbound half of the messaging platform.

use nosh_types::error::MessengerError;
use nosh_types::message::OutboundMessage;

/// Delivers replies to a chat.
///
/// Implementations live in nosh-infra (e.g., `TelegramClient`). A message
/// with a keyboard must go through the platform's rich-message path.
pub trait Messenger: Send + Sync {
    fn send(
        &self,
        message: &OutboundMessage,
    ) -> impl std::future::Future<Output = Result<(), MessengerError>> + Send;
}

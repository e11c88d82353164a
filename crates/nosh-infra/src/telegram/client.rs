//! TelegramClient -- concrete [`Messenger`] implementation for the Telegram Bot API.
//!
//! Every Bot API method is a POST to `{base_url}/bot{token}/{method}` with a
//! JSON body, answered by the `{ok, result, description}` envelope.
//!
//! The bot token is part of every request URL, so transport errors are
//! stripped of their URL before they are formatted or logged.

use std::time::Duration;

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use nosh_core::messenger::Messenger;
use nosh_types::config::TelegramConfig;
use nosh_types::error::MessengerError;
use nosh_types::identity::BotIdentity;
use nosh_types::message::OutboundMessage;

use super::types::{SendMessageRequest, SetWebhookRequest, TelegramResponse, User};

/// Telegram Bot API client.
pub struct TelegramClient {
    client: reqwest::Client,
    token: SecretString,
    base_url: String,
}

// No Debug: the token is embedded in request URLs.

impl TelegramClient {
    /// Create a client with the configured base URL and request timeout.
    pub fn new(token: SecretString, config: &TelegramConfig) -> Result<Self, MessengerError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| MessengerError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            token,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Look up the bot's own account.
    pub async fn get_me(&self) -> Result<BotIdentity, MessengerError> {
        let user: User = self.call("getMe", &serde_json::json!({})).await?;
        Ok(BotIdentity::from(user))
    }

    /// Point Telegram's update delivery at `url`.
    ///
    /// When `secret_token` is set Telegram echoes it in the
    /// `X-Telegram-Bot-Api-Secret-Token` header of every delivery.
    pub async fn set_webhook(
        &self,
        url: &str,
        secret_token: Option<&str>,
    ) -> Result<(), MessengerError> {
        let body = SetWebhookRequest {
            url,
            secret_token,
            allowed_updates: vec!["message"],
        };
        let _: bool = self.call("setWebhook", &body).await?;
        Ok(())
    }

    /// Remove the registered webhook.
    pub async fn delete_webhook(&self) -> Result<(), MessengerError> {
        let _: bool = self.call("deleteWebhook", &serde_json::json!({})).await?;
        Ok(())
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.base_url,
            self.token.expose_secret(),
            method
        )
    }

    async fn call<B, T>(&self, method: &str, body: &B) -> Result<T, MessengerError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.method_url(method))
            .json(body)
            .send()
            .await
            .map_err(|e| MessengerError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| MessengerError::Transport(e.without_url().to_string()))?;

        debug!(method, status = status.as_u16(), "Telegram API call finished");
        parse_envelope(method, status, &text)
    }
}

/// Unwrap a Bot API envelope.
///
/// Telegram reports failures with a non-2xx status *and* an envelope, so the
/// body is decoded first and the bare status is only used when it is not a
/// recognisable envelope.
pub(crate) fn parse_envelope<T: DeserializeOwned>(
    method: &str,
    status: StatusCode,
    body: &str,
) -> Result<T, MessengerError> {
    let envelope: TelegramResponse<T> = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(e) if status.is_success() => {
            return Err(MessengerError::Deserialization(format!(
                "{method} response: {e}"
            )));
        }
        Err(_) => {
            return Err(MessengerError::Rejected {
                method: method.to_string(),
                description: format!("HTTP {status}"),
            });
        }
    };

    match (envelope.ok, envelope.result) {
        (true, Some(result)) => Ok(result),
        (true, None) => Err(MessengerError::Deserialization(format!(
            "{method} response has no result"
        ))),
        (false, _) => Err(MessengerError::Rejected {
            method: method.to_string(),
            description: envelope
                .description
                .unwrap_or_else(|| format!("HTTP {status}")),
        }),
    }
}

impl Messenger for TelegramClient {
    async fn send(&self, message: &OutboundMessage) -> Result<(), MessengerError> {
        let body = SendMessageRequest::from(message);
        let _: serde_json::Value = self.call("sendMessage", &body).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> TelegramClient {
        let config = TelegramConfig {
            base_url: base_url.to_string(),
            ..TelegramConfig::default()
        };
        TelegramClient::new(SecretString::from("123:abc"), &config).unwrap()
    }

    #[test]
    fn test_method_url() {
        let client = client("https://api.telegram.org/");
        assert_eq!(
            client.method_url("sendMessage"),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
    }

    #[test]
    fn test_envelope_ok() {
        let user: User = parse_envelope(
            "getMe",
            StatusCode::OK,
            r#"{"ok":true,"result":{"id":1,"is_bot":true,"first_name":"Nosh","username":"nosh_bot"}}"#,
        )
        .unwrap();
        assert_eq!(user.username.as_deref(), Some("nosh_bot"));
    }

    #[test]
    fn test_envelope_rejected_with_description() {
        let err = parse_envelope::<serde_json::Value>(
            "sendMessage",
            StatusCode::BAD_REQUEST,
            r#"{"ok":false,"error_code":400,"description":"Bad Request: chat not found"}"#,
        )
        .unwrap_err();
        match err {
            MessengerError::Rejected {
                method,
                description,
            } => {
                assert_eq!(method, "sendMessage");
                assert_eq!(description, "Bad Request: chat not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_envelope_non_json_error_status() {
        let err = parse_envelope::<bool>("setWebhook", StatusCode::BAD_GATEWAY, "<html>")
            .unwrap_err();
        assert!(matches!(err, MessengerError::Rejected { .. }));
        assert!(err.to_string().contains("502"));
    }

    #[test]
    fn test_envelope_garbage_on_success() {
        let err = parse_envelope::<bool>("deleteWebhook", StatusCode::OK, "not json").unwrap_err();
        assert!(matches!(err, MessengerError::Deserialization(_)));
    }

    #[test]
    fn test_envelope_ok_without_result() {
        let err = parse_envelope::<bool>("setWebhook", StatusCode::OK, r#"{"ok":true}"#)
            .unwrap_err();
        assert!(matches!(err, MessengerError::Deserialization(_)));
    }

    #[tokio::test]
    async fn test_transport_error_does_not_leak_token() {
        // Nothing listens on port 9 (discard); the connection is refused.
        let client = client("http://127.0.0.1:9");
        let err = client
            .send(&OutboundMessage::new(1, "hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, MessengerError::Transport(_)));
        assert!(!err.to_string().contains("123:abc"));
    }
}

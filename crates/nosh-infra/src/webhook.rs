//! Webhook secret-token verification.
//!
//! When a secret is registered with `setWebhook`, Telegram sends it back in
//! the `X-Telegram-Bot-Api-Secret-Token` header of every delivery. Requests
//! whose header does not match are rejected before their body is decoded.

/// Header Telegram uses to echo the webhook secret.
pub const SECRET_TOKEN_HEADER: &str = "x-telegram-bot-api-secret-token";

/// Errors that can occur during webhook verification.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    /// The secret-token header is absent.
    #[error("missing {SECRET_TOKEN_HEADER} header")]
    MissingToken,

    /// The secret-token header does not match the configured secret.
    #[error("webhook secret token mismatch")]
    TokenMismatch,
}

/// Check a delivery's secret-token header against the configured secret.
///
/// With no configured secret every delivery is accepted.
pub fn verify_secret_token(expected: Option<&str>, provided: Option<&str>) -> Result<(), WebhookError> {
    let Some(expected) = expected else {
        return Ok(());
    };
    let provided = provided.ok_or(WebhookError::MissingToken)?;

    if constant_time_eq(expected.as_bytes(), provided.as_bytes()) {
        Ok(())
    } else {
        Err(WebhookError::TokenMismatch)
    }
}

/// Normalize a configured route so it always starts with a single `/`.
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim().trim_start_matches('/');
    format!("/{trimmed}")
}

/// Constant-time byte slice comparison.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result: u8 = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

//! Telegram webhook receiver.
//!
//! Verifies the secret-token header, decodes the `Update`, and runs the
//! message through the relay. Telegram retries any non-2xx answer, so
//! updates that carry no message are acknowledged and dropped.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use tracing::{Instrument, debug, info_span};
use uuid::Uuid;

use nosh_core::messenger::Messenger;
use nosh_core::search::SearchProvider;
use nosh_core::session::SessionStore;
use nosh_infra::telegram::Update;
use nosh_infra::webhook::{SECRET_TOKEN_HEADER, verify_secret_token};

use crate::http::error::AppError;
use crate::state::AppState;

/// POST {webhook.path} - Receive one Telegram update.
pub async fn receive_update<P, S, M>(
    State(state): State<AppState<P, S, M>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<&'static str, AppError>
where
    P: SearchProvider + 'static,
    S: SessionStore + 'static,
    M: Messenger + 'static,
{
    let provided = headers
        .get(SECRET_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok());
    verify_secret_token(state.webhook_secret(), provided)?;

    let update: Update = serde_json::from_slice(&body)
        .map_err(|e| AppError::Validation(format!("invalid update payload: {e}")))?;
    let update_id = update.update_id;

    let Some(inbound) = update.into_inbound() else {
        debug!(update_id, "Ignoring update without a message");
        return Ok("OK");
    };

    let span = info_span!(
        "update",
        request_id = %Uuid::now_v7(),
        update_id,
        chat_id = inbound.chat_id
    );
    state.relay.handle(&inbound).instrument(span).await?;

    Ok("OK")
}

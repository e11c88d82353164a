//! Liveness and greeting endpoints.

use axum::Json;
use axum::extract::State;

use nosh_core::messenger::Messenger;
use nosh_core::search::SearchProvider;
use nosh_core::session::SessionStore;

use crate::state::AppState;

/// GET /health - status, version, and live session count.
pub async fn health_check<P, S, M>(State(state): State<AppState<P, S, M>>) -> Json<serde_json::Value>
where
    P: SearchProvider + 'static,
    S: SessionStore + 'static,
    M: Messenger + 'static,
{
    let engine = state.relay.engine();
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "bot": engine.identity().handle,
        "provider": engine.provider().name(),
        "sessions": engine.sessions().len(),
    }))
}

/// GET / - the greeting, as plain text.
pub async fn greeting<P, S, M>(State(state): State<AppState<P, S, M>>) -> String
where
    P: SearchProvider + 'static,
    S: SessionStore + 'static,
    M: Messenger + 'static,
{
    state.greeting.to_string()
}

//! Axum router configuration with middleware.
//!
//! Routes: `POST {webhook.path}`, `GET /`, `GET /health`.
//! Middleware: request timeout, tracing.

use std::time::Duration;

use axum::Router;
use axum::routing::{get, post};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use nosh_core::messenger::Messenger;
use nosh_core::search::SearchProvider;
use nosh_core::session::SessionStore;
use nosh_infra::webhook::normalize_path;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router<P, S, M>(state: AppState<P, S, M>) -> Router
where
    P: SearchProvider + 'static,
    S: SessionStore + 'static,
    M: Messenger + 'static,
{
    let webhook_path = normalize_path(&state.config.webhook.path);
    let timeout = Duration::from_secs(state.config.server.request_timeout_secs);

    Router::new()
        .route("/", get(handlers::health::greeting::<P, S, M>))
        .route("/health", get(handlers::health::health_check::<P, S, M>))
        .route(&webhook_path, post(handlers::webhook::receive_update::<P, S, M>))
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{Arc, Mutex};

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    use nosh_core::chat::engine::ConversationEngine;
    use nosh_core::chat::replies;
    use nosh_core::chat::service::RelayService;
    use nosh_core::session::InMemorySessionStore;
    use nosh_types::chat::ConversationState;
    use nosh_types::config::NoshConfig;
    use nosh_types::error::{MessengerError, SearchError};
    use nosh_types::identity::BotIdentity;
    use nosh_types::message::{Coordinates, OutboundMessage};
    use nosh_types::search::{Business, SearchResult};

    #[derive(Clone, Default)]
    struct StubProvider {
        coordinate_calls: Arc<Mutex<Vec<(String, Coordinates)>>>,
    }

    impl SearchProvider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        async fn search_by_location(
            &self,
            _term: &str,
            _location: &str,
        ) -> Result<SearchResult, SearchError> {
            Ok(SearchResult::default())
        }

        async fn search_by_coordinates(
            &self,
            term: &str,
            coordinates: Coordinates,
        ) -> Result<SearchResult, SearchError> {
            self.coordinate_calls
                .lock()
                .unwrap()
                .push((term.to_string(), coordinates));
            Ok(SearchResult {
                total: 1,
                businesses: vec![Business {
                    name: "Sushi Place".to_string(),
                    rating: 4.5,
                    review_count: 12,
                    price: None,
                    address: "1 Main St".to_string(),
                    url: "https://www.yelp.com/biz/sushi-place".to_string(),
                    is_closed: false,
                }],
            })
        }
    }

    #[derive(Clone, Default)]
    struct RecordingMessenger {
        sent: Arc<Mutex<Vec<OutboundMessage>>>,
        reject: bool,
    }

    impl Messenger for RecordingMessenger {
        async fn send(&self, message: &OutboundMessage) -> Result<(), MessengerError> {
            if self.reject {
                return Err(MessengerError::Transport("connection reset".to_string()));
            }
            self.sent.lock().unwrap().push(message.clone());
            Ok(())
        }
    }

    type TestState = AppState<StubProvider, InMemorySessionStore, RecordingMessenger>;

    fn state_with(messenger: RecordingMessenger, config: NoshConfig) -> TestState {
        let engine = ConversationEngine::new(
            StubProvider::default(),
            InMemorySessionStore::new(),
            BotIdentity::new(99, "Nosh", "nosh_bot"),
        );
        AppState::new(RelayService::new(engine, messenger), config)
    }

    fn text_update(chat_id: i64, message_id: i64, text: &str) -> String {
        json!({
            "update_id": message_id,
            "message": {
                "message_id": message_id,
                "from": { "id": 5, "is_bot": false, "first_name": "Ada" },
                "chat": { "id": chat_id, "type": "private" },
                "date": 1700000000,
                "text": text
            }
        })
        .to_string()
    }

    fn location_update(chat_id: i64, message_id: i64, lat: f64, lon: f64) -> String {
        json!({
            "update_id": message_id,
            "message": {
                "message_id": message_id,
                "chat": { "id": chat_id, "type": "private" },
                "date": 1700000000,
                "location": { "latitude": lat, "longitude": lon }
            }
        })
        .to_string()
    }

    fn post_update(body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/message")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let app = build_router(state_with(RecordingMessenger::default(), NoshConfig::default()));
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["provider"], "stub");
        assert_eq!(body["sessions"], 0);
    }

    #[tokio::test]
    async fn root_serves_greeting() {
        let app = build_router(state_with(RecordingMessenger::default(), NoshConfig::default()));
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let text = body_string(response).await;
        assert!(text.contains("Nosh"));
        assert!(text.contains("@nosh_bot"));
    }

    #[tokio::test]
    async fn start_command_is_answered() {
        let messenger = RecordingMessenger::default();
        let app = build_router(state_with(messenger.clone(), NoshConfig::default()));

        let response = app.oneshot(post_update(text_update(42, 1, "/start"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let sent = messenger.sent.lock().unwrap().clone();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].chat_id, 42);
        assert!(sent[0].text.contains("@nosh_bot"));
    }

    #[tokio::test]
    async fn search_then_location_runs_one_coordinate_search() {
        let messenger = RecordingMessenger::default();
        let state = state_with(messenger.clone(), NoshConfig::default());
        let relay = Arc::clone(&state.relay);
        let app = build_router(state);

        let first = app
            .clone()
            .oneshot(post_update(text_update(7, 1, "/search sushi nearby")))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        let second = app
            .oneshot(post_update(location_update(7, 2, 33.45, -112.07)))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::OK);

        let sent = messenger.sent.lock().unwrap().clone();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].text, replies::SHARE_LOCATION);
        assert!(sent[0].requests_location());
        assert!(sent[1].text.starts_with("Got 1 results searching for sushi"));

        let calls = relay.engine().provider().coordinate_calls.lock().unwrap().clone();
        assert_eq!(calls, vec![("sushi".to_string(), Coordinates::new(33.45, -112.07))]);

        let session = relay.engine().sessions().get(7).unwrap();
        assert_eq!(session.state, ConversationState::Idle);
    }

    #[tokio::test]
    async fn malformed_body_is_rejected_without_reply() {
        let messenger = RecordingMessenger::default();
        let app = build_router(state_with(messenger.clone(), NoshConfig::default()));

        let response = app
            .oneshot(post_update("{not json".to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(messenger.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_without_message_is_acknowledged() {
        let messenger = RecordingMessenger::default();
        let app = build_router(state_with(messenger.clone(), NoshConfig::default()));

        let body = json!({ "update_id": 3, "callback_query": { "id": "1" } }).to_string();
        let response = app.oneshot(post_update(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(messenger.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn delivery_failure_maps_to_bad_gateway() {
        let messenger = RecordingMessenger {
            reject: true,
            ..RecordingMessenger::default()
        };
        let app = build_router(state_with(messenger, NoshConfig::default()));

        let response = app.oneshot(post_update(text_update(1, 1, "/help"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["errors"][0]["code"], "DELIVERY_FAILED");
    }

    #[tokio::test]
    async fn secret_token_is_enforced() {
        let mut config = NoshConfig::default();
        config.webhook.secret_token = Some("s3cret".to_string());
        let messenger = RecordingMessenger::default();
        let app = build_router(state_with(messenger.clone(), config));

        let missing = app
            .clone()
            .oneshot(post_update(text_update(1, 1, "/start")))
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

        let mut wrong = post_update(text_update(1, 2, "/start"));
        wrong
            .headers_mut()
            .insert("x-telegram-bot-api-secret-token", "nope".parse().unwrap());
        let wrong = app.clone().oneshot(wrong).await.unwrap();
        assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

        let mut right = post_update(text_update(1, 3, "/start"));
        right
            .headers_mut()
            .insert("x-telegram-bot-api-secret-token", "s3cret".parse().unwrap());
        let right = app.oneshot(right).await.unwrap();
        assert_eq!(right.status(), StatusCode::OK);

        assert_eq!(messenger.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn custom_webhook_path() {
        let mut config = NoshConfig::default();
        config.webhook.path = "hooks/telegram".to_string();
        let app = build_router(state_with(RecordingMessenger::default(), config));

        let request = Request::builder()
            .method("POST")
            .uri("/hooks/telegram")
            .body(Body::from(text_update(1, 1, "/help")))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let old = app.oneshot(post_update(text_update(1, 2, "/help"))).await.unwrap();
        assert_eq!(old.status(), StatusCode::NOT_FOUND);
    }
}

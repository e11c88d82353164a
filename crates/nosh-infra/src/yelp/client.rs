//! YelpClient -- concrete [`SearchProvider`] implementation for Yelp Fusion.
//!
//! Sends `GET {base_url}/businesses/search` with bearer authentication.
//! The API key is wrapped in [`SecretString`] and only exposed when building
//! the `Authorization` header.

use std::time::Duration;

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use nosh_core::search::SearchProvider;
use nosh_types::config::YelpConfig;
use nosh_types::error::SearchError;
use nosh_types::message::Coordinates;
use nosh_types::search::SearchResult;

use super::types::{YelpErrorResponse, YelpSearchResponse};

/// Yelp Fusion business search client.
pub struct YelpClient {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    limit: u32,
}

impl YelpClient {
    pub fn new(api_key: SecretString, config: &YelpConfig) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SearchError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            limit: config.result_limit,
        })
    }

    fn search_url(&self) -> String {
        format!("{}/businesses/search", self.base_url)
    }

    async fn search(&self, query: &[(&str, String)]) -> Result<SearchResult, SearchError> {
        let response = self
            .client
            .get(self.search_url())
            .bearer_auth(self.api_key.expose_secret())
            .query(query)
            .query(&[("limit", self.limit)])
            .send()
            .await
            .map_err(|e| SearchError::Transport(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Transport(format!("failed to read response: {e}")))?;

        let mut result = parse_search_response(status, &body)?;
        let dropped = result.retain_open();
        debug!(
            status = status.as_u16(),
            total = result.total,
            returned = result.businesses.len(),
            dropped_closed = dropped,
            "Yelp search finished"
        );
        Ok(result)
    }
}

/// Decode a `/businesses/search` response body.
pub(crate) fn parse_search_response(
    status: StatusCode,
    body: &str,
) -> Result<SearchResult, SearchError> {
    if !status.is_success() {
        return Err(match serde_json::from_str::<YelpErrorResponse>(body) {
            Ok(err) => SearchError::Provider {
                code: err.error.code,
                description: err.error.description,
            },
            Err(_) => SearchError::Status {
                status: status.as_u16(),
            },
        });
    }

    serde_json::from_str::<YelpSearchResponse>(body)
        .map(SearchResult::from)
        .map_err(|e| SearchError::Deserialization(format!("failed to parse response: {e}")))
}

impl SearchProvider for YelpClient {
    fn name(&self) -> &str {
        "yelp"
    }

    async fn search_by_location(
        &self,
        term: &str,
        location: &str,
    ) -> Result<SearchResult, SearchError> {
        self.search(&[("term", term.to_string()), ("location", location.to_string())])
            .await
    }

    async fn search_by_coordinates(
        &self,
        term: &str,
        coordinates: Coordinates,
    ) -> Result<SearchResult, SearchError> {
        self.search(&[
            ("term", term.to_string()),
            ("latitude", coordinates.latitude.to_string()),
            ("longitude", coordinates.longitude.to_string()),
        ])
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url() {
        let config = YelpConfig {
            base_url: "https://api.yelp.com/v3/".to_string(),
            ..YelpConfig::default()
        };
        let client = YelpClient::new(SecretString::from("key"), &config).unwrap();
        assert_eq!(client.search_url(), "https://api.yelp.com/v3/businesses/search");
        assert_eq!(client.name(), "yelp");
    }

    #[test]
    fn test_parse_success_keeps_closed_for_caller() {
        let body = r#"{
            "total": 3,
            "businesses": [
                {"name": "Open A", "rating": 4.0, "review_count": 10, "url": "u1", "is_closed": false,
                 "location": {"address1": "1 A St"}},
                {"name": "Closed B", "rating": 3.0, "review_count": 5, "url": "u2", "is_closed": true,
                 "location": {"address1": "2 B St"}}
            ]
        }"#;
        let mut result = parse_search_response(StatusCode::OK, body).unwrap();
        assert_eq!(result.total, 3);
        assert_eq!(result.businesses.len(), 2);

        assert_eq!(result.retain_open(), 1);
        assert_eq!(result.total, 2);
        assert_eq!(result.businesses[0].name, "Open A");
    }

    #[test]
    fn test_parse_provider_error() {
        let body = r#"{"error": {"code": "VALIDATION_ERROR", "description": "Please specify a location or a latitude and longitude"}}"#;
        let err = parse_search_response(StatusCode::BAD_REQUEST, body).unwrap_err();
        match err {
            SearchError::Provider { code, description } => {
                assert_eq!(code, "VALIDATION_ERROR");
                assert!(description.starts_with("Please specify"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_bare_status() {
        let err = parse_search_response(StatusCode::SERVICE_UNAVAILABLE, "oops").unwrap_err();
        assert!(matches!(err, SearchError::Status { status: 503 }));
    }

    #[test]
    fn test_parse_malformed_success() {
        let err = parse_search_response(StatusCode::OK, "{").unwrap_err();
        assert!(matches!(err, SearchError::Deserialization(_)));
    }
}

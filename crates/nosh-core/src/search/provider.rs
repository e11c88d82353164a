//! SearchProvider trait definition.

use nosh_types::error::SearchError;
use nosh_types::message::Coordinates;
use nosh_types::search::SearchResult;

/// A business-search backend (Yelp in production).
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// Implementations live in nosh-infra (e.g., `YelpClient`). The engine only
/// distinguishes success from failure; error contents are for logging.
pub trait SearchProvider: Send + Sync {
    /// Human-readable provider name (e.g., "yelp").
    fn name(&self) -> &str;

    /// Search for `term` around a free-text location ("Phoenix, AZ").
    fn search_by_location(
        &self,
        term: &str,
        location: &str,
    ) -> impl std::future::Future<Output = Result<SearchResult, SearchError>> + Send;

    /// Search for `term` around a point.
    fn search_by_coordinates(
        &self,
        term: &str,
        coordinates: Coordinates,
    ) -> impl std::future::Future<Output = Result<SearchResult, SearchError>> + Send;
}

//! Yelp Fusion API wire types.

use serde::Deserialize;

use nosh_types::search::{Business, SearchResult};

/// Body of a successful `/businesses/search` response.
#[derive(Debug, Deserialize)]
pub struct YelpSearchResponse {
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub businesses: Vec<YelpBusiness>,
}

impl From<YelpSearchResponse> for SearchResult {
    fn from(response: YelpSearchResponse) -> Self {
        SearchResult {
            total: response.total,
            businesses: response.businesses.into_iter().map(Business::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct YelpBusiness {
    pub name: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub is_closed: bool,
    #[serde(default)]
    pub location: YelpLocation,
}

impl From<YelpBusiness> for Business {
    fn from(business: YelpBusiness) -> Self {
        Business {
            name: business.name,
            rating: business.rating,
            review_count: business.review_count,
            price: business.price.filter(|p| !p.is_empty()),
            address: business.location.street_address(),
            url: business.url,
            is_closed: business.is_closed,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct YelpLocation {
    #[serde(default)]
    pub address1: Option<String>,
    #[serde(default)]
    pub display_address: Vec<String>,
}

impl YelpLocation {
    /// First line of the address, falling back to the display address.
    pub fn street_address(&self) -> String {
        match self.address1.as_deref().map(str::trim) {
            Some(line) if !line.is_empty() => line.to_string(),
            _ => self.display_address.join(", "),
        }
    }
}

/// Body of an error response: `{"error": {"code": .., "description": ..}}`.
#[derive(Debug, Deserialize)]
pub struct YelpErrorResponse {
    pub error: YelpError,
}

#[derive(Debug, Deserialize)]
pub struct YelpError {
    pub code: String,
    #[serde(default)]
    pub description: String,
}

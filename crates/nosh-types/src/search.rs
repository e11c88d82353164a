//! Business search result types.

use serde::{Deserialize, Serialize};

/// A single business returned by the search provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Business {
    pub name: String,
    /// Average rating, 0.0 to 5.0.
    pub rating: f64,
    pub review_count: u32,
    /// Price tier such as `$$`. Not every listing has one.
    pub price: Option<String>,
    /// First line of the street address.
    pub address: String,
    /// Canonical listing URL.
    pub url: String,
    pub is_closed: bool,
}

/// The outcome of a business search.
///
/// `total` is the provider's count of matches, which may exceed the number
/// of businesses actually returned in this page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchResult {
    pub total: u32,
    pub businesses: Vec<Business>,
}

impl SearchResult {
    /// Drop closed businesses, reducing `total` by the number removed.
    ///
    /// Returns how many were dropped.
    pub fn retain_open(&mut self) -> usize {
        let before = self.businesses.len();
        self.businesses.retain(|b| !b.is_closed);
        let closed = before - self.businesses.len();
        self.total = self.total.saturating_sub(closed as u32);
        closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn business(name: &str, is_closed: bool) -> Business {
        Business {
            name: name.to_string(),
            rating: 4.0,
            review_count: 10,
            price: Some("$".to_string()),
            address: "1 Main St".to_string(),
            url: "https://example.com".to_string(),
            is_closed,
        }
    }

    #[test]
    fn test_retain_open_adjusts_total() {
        let mut result = SearchResult {
            total: 40,
            businesses: vec![business("a", false), business("b", true), business("c", true)],
        };
        assert_eq!(result.retain_open(), 2);
        assert_eq!(result.total, 38);
        assert_eq!(result.businesses.len(), 1);
        assert_eq!(result.businesses[0].name, "a");
    }

    #[test]
    fn test_retain_open_never_underflows() {
        let mut result = SearchResult {
            total: 0,
            businesses: vec![business("a", true)],
        };
        result.retain_open();
        assert_eq!(result.total, 0);
    }
}

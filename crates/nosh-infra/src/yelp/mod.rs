//! Yelp Fusion business search.

pub mod client;
pub mod types;

pub use client::YelpClient;

//! Business search abstraction.

pub mod provider;

pub use provider::SearchProvider;

//! The conversation engine and its building blocks.
//!
//! - `parser` splits message text into a command token and remainder
//! - `query` extracts the search term and location phrase
//! - `engine` runs the per-chat state machine
//! - `format` renders search results into replies
//! - `service` ties the engine to the outbound messenger

pub mod cuisine;
pub mod engine;
pub mod format;
pub mod parser;
pub mod query;
pub mod replies;
pub mod service;

//! Shared domain types for Nosh.
//!
//! This crate contains the types passed between the conversation engine and
//! its collaborators: chat sessions, inbound/outbound messages, search
//! results, the bot identity, configuration, and error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod identity;
pub mod message;
pub mod search;

//! Conversation engine and collaborator traits for Nosh.
//!
//! This crate holds the decision logic: command parsing, query extraction,
//! per-chat session state, the search/location state machine, and reply
//! formatting. It defines the "ports" (`SearchProvider`, `Messenger`,
//! `SessionStore`) that the infrastructure layer implements, and depends
//! only on `nosh-types` -- never on `nosh-infra` or any HTTP crate.

pub mod chat;
pub mod messenger;
pub mod search;
pub mod session;

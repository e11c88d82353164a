//! Per-chat session storage.
//!
//! `SessionStore` is the port the engine reads and updates; `memory`
//! provides the in-process implementation.

pub mod memory;
pub mod store;

pub use memory::InMemorySessionStore;
pub use store::SessionStore;

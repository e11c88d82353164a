//! HTTP layer for Nosh.
//!
//! Axum router serving the Telegram webhook, the greeting page, and a
//! health check.

pub mod error;
pub mod handlers;
pub mod router;

//! Infrastructure implementations for Nosh.
//!
//! Implements the ports defined in `nosh-core`:
//! - `telegram` -- Telegram Bot API client (`Messenger`, update decoding)
//! - `yelp` -- Yelp Fusion business search (`SearchProvider`)
//! - `config` -- `config.toml` loading
//! - `webhook` -- webhook secret-token verification

pub mod config;
pub mod telegram;
pub mod webhook;
pub mod yelp;

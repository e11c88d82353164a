//! Configuration types for Nosh.
//!
//! `NoshConfig` represents `config.toml`. Every field has a default, so an
//! empty or missing file yields a working configuration (secrets aside,
//! which come from the command line or environment).

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoshConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub webhook: WebhookConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub yelp: YelpConfig,
    #[serde(default)]
    pub sessions: SessionConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Upper bound on handling one webhook delivery, in seconds. Must exceed
    /// the Yelp and Telegram client timeouts combined, since one delivery can
    /// wait on both in turn.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout_secs() -> u64 {
    45
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl NoshConfig {
    /// Worst-case seconds one delivery spends waiting on the search and
    /// send clients.
    pub fn client_time_budget_secs(&self) -> u64 {
        self.yelp.timeout_secs.saturating_add(self.telegram.timeout_secs)
    }

    /// Whether the server timeout can cut a delivery off after the session
    /// was already updated.
    pub fn request_timeout_too_short(&self) -> bool {
        self.server.request_timeout_secs <= self.client_time_budget_secs()
    }
}

/// Webhook registration and verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Public HTTPS base URL Telegram should deliver to, e.g.
    /// `https://bot.example.com`. Required only for `--register-webhook`.
    #[serde(default)]
    pub public_url: Option<String>,
    /// Route the webhook is served on.
    #[serde(default = "default_webhook_path")]
    pub path: String,
    /// Value Telegram echoes in `X-Telegram-Bot-Api-Secret-Token`.
    #[serde(default)]
    pub secret_token: Option<String>,
}

fn default_webhook_path() -> String {
    "/message".to_string()
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            public_url: None,
            path: default_webhook_path(),
            secret_token: None,
        }
    }
}

impl WebhookConfig {
    /// Full URL to register with Telegram, if a public URL is configured.
    pub fn registration_url(&self) -> Option<String> {
        self.public_url.as_ref().map(|base| {
            let base = base.trim_end_matches('/');
            if self.path.starts_with('/') {
                format!("{base}{}", self.path)
            } else {
                format!("{base}/{}", self.path)
            }
        })
    }
}

/// Telegram Bot API client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default = "default_telegram_base_url")]
    pub base_url: String,
    #[serde(default = "default_client_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_telegram_base_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_client_timeout_secs() -> u64 {
    15
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            base_url: default_telegram_base_url(),
            timeout_secs: default_client_timeout_secs(),
        }
    }
}

/// Yelp Fusion API client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YelpConfig {
    #[serde(default = "default_yelp_base_url")]
    pub base_url: String,
    #[serde(default = "default_client_timeout_secs")]
    pub timeout_secs: u64,
    /// Businesses requested per search.
    #[serde(default = "default_result_limit")]
    pub result_limit: u32,
}

fn default_yelp_base_url() -> String {
    "https://api.yelp.com/v3".to_string()
}

fn default_result_limit() -> u32 {
    20
}

impl Default for YelpConfig {
    fn default() -> Self {
        Self {
            base_url: default_yelp_base_url(),
            timeout_secs: default_client_timeout_secs(),
            result_limit: default_result_limit(),
        }
    }
}

/// Session retention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Drop sessions untouched for this long. `None` keeps them forever.
    #[serde(default)]
    pub idle_ttl_secs: Option<u64>,
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

fn default_sweep_interval_secs() -> u64 {
    600
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_ttl_secs: None,
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

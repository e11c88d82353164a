//! CLI command definitions for the `nosh` binary.
//!
//! Uses clap derive macros for argument parsing. Secrets are read from the
//! environment by default so they stay out of shell history.

pub mod bot;
pub mod serve;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use secrecy::SecretString;

/// Telegram bot that finds places to eat nearby.
#[derive(Parser)]
#[command(name = "nosh", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config.toml (default: $NOSH_CONFIG, then ~/.nosh/config.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output machine-readable JSON (command output and logs).
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the webhook server.
    Serve(ServeArgs),

    /// Show the bot account behind the token.
    Whoami {
        #[command(flatten)]
        telegram: TelegramArgs,
    },

    /// Manage the Telegram webhook registration.
    Webhook {
        #[command(subcommand)]
        action: WebhookCommand,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Args)]
pub struct ServeArgs {
    /// Host to bind to (overrides server.host).
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides server.port).
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Register {webhook.public_url}{webhook.path} with Telegram before serving.
    #[arg(long)]
    pub register_webhook: bool,

    #[command(flatten)]
    pub telegram: TelegramArgs,

    #[command(flatten)]
    pub yelp: YelpArgs,
}

#[derive(Subcommand)]
pub enum WebhookCommand {
    /// Register a webhook URL (default: from config).
    Set {
        /// Full HTTPS URL Telegram should deliver updates to.
        url: Option<String>,

        /// Secret echoed in X-Telegram-Bot-Api-Secret-Token (default: from config).
        #[arg(long)]
        secret: Option<String>,

        #[command(flatten)]
        telegram: TelegramArgs,
    },

    /// Remove the webhook registration.
    Delete {
        #[command(flatten)]
        telegram: TelegramArgs,
    },
}

#[derive(Args)]
pub struct TelegramArgs {
    /// Telegram bot token.
    #[arg(long = "telegram-token", env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
    token: String,
}

impl TelegramArgs {
    pub fn into_secret(self) -> SecretString {
        SecretString::from(self.token)
    }
}

#[derive(Args)]
pub struct YelpArgs {
    /// Yelp Fusion API key.
    #[arg(long = "yelp-api-key", env = "YELP_API_KEY", hide_env_values = true)]
    api_key: String,
}

impl YelpArgs {
    pub fn into_secret(self) -> SecretString {
        SecretString::from(self.api_key)
    }
}

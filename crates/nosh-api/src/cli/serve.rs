//! `nosh serve`: wire the live collaborators and run the webhook server.

use std::time::Duration;

use anyhow::{Context, Result};
use console::style;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use nosh_core::chat::engine::ConversationEngine;
use nosh_core::chat::service::RelayService;
use nosh_core::session::InMemorySessionStore;
use nosh_infra::telegram::TelegramClient;
use nosh_infra::yelp::YelpClient;
use nosh_types::config::NoshConfig;
use nosh_types::error::ConfigError;

use super::ServeArgs;
use crate::http;
use crate::state::{LiveRelay, LiveState};
use crate::sweeper::spawn_session_sweeper;

pub async fn serve(mut config: NoshConfig, args: ServeArgs, quiet: bool) -> Result<()> {
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    if config.request_timeout_too_short() {
        warn!(
            request_timeout_secs = config.server.request_timeout_secs,
            client_time_budget_secs = config.client_time_budget_secs(),
            "server.request_timeout_secs does not cover the Yelp and Telegram timeouts; \
             slow deliveries may be cut off after the session was updated"
        );
    }

    let telegram = TelegramClient::new(args.telegram.into_secret(), &config.telegram)?;
    let identity = telegram
        .get_me()
        .await
        .context("failed to look up the bot account; check TELEGRAM_BOT_TOKEN")?;
    info!(bot_id = identity.id, handle = %identity.handle, "Authorized on account");

    if args.register_webhook {
        let url = config
            .webhook
            .registration_url()
            .ok_or_else(|| ConfigError::Missing("webhook.public_url".to_string()))?;
        telegram
            .set_webhook(&url, config.webhook.secret_token.as_deref())
            .await
            .context("failed to register webhook")?;
        info!(%url, "Webhook registered");
    }

    let yelp = YelpClient::new(args.yelp.into_secret(), &config.yelp)?;
    let sessions = InMemorySessionStore::new();
    let engine = ConversationEngine::new(yelp, sessions.clone(), identity);
    let relay: LiveRelay = RelayService::new(engine, telegram);

    let cancel = CancellationToken::new();
    let sweeper = config.sessions.idle_ttl_secs.map(|ttl| {
        info!(
            idle_ttl_secs = ttl,
            sweep_interval_secs = config.sessions.sweep_interval_secs,
            "Session eviction enabled"
        );
        spawn_session_sweeper(
            sessions.clone(),
            Duration::from_secs(ttl),
            Duration::from_secs(config.sessions.sweep_interval_secs.max(1)),
            cancel.clone(),
        )
    });

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let webhook_path = config.webhook.path.clone();
    let state = LiveState::new(relay, config);
    let router = http::router::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, webhook_path = %webhook_path, "Listening");
    if !quiet {
        println!(
            "  {} Nosh listening on {}",
            style("🍜").bold(),
            style(format!("http://{addr}")).cyan()
        );
        println!("  {}", style("Press Ctrl+C to stop").dim());
    }

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    cancel.cancel();
    if let Some(handle) = sweeper {
        let _ = handle.await;
    }
    info!("Server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

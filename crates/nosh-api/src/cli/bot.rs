//! Bot account commands: whoami, webhook set/delete.

use anyhow::Result;
use console::style;

use nosh_infra::telegram::TelegramClient;
use nosh_types::config::NoshConfig;
use nosh_types::error::ConfigError;

use super::TelegramArgs;

/// Print the bot identity behind the token.
pub async fn whoami(config: &NoshConfig, telegram: TelegramArgs, json: bool) -> Result<()> {
    let client = TelegramClient::new(telegram.into_secret(), &config.telegram)?;
    let identity = client.get_me().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&identity)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} {} ({})",
        style("🤖").bold(),
        style(&identity.name).cyan().bold(),
        style(format!("@{}", identity.handle)).dim()
    );
    println!("  ID: {}", identity.id);
    println!();
    Ok(())
}

/// Register the webhook. Falls back to the configured URL and secret.
pub async fn set_webhook(
    config: &NoshConfig,
    telegram: TelegramArgs,
    url: Option<String>,
    secret: Option<String>,
    json: bool,
) -> Result<()> {
    let url = url
        .or_else(|| config.webhook.registration_url())
        .ok_or_else(|| ConfigError::Missing("webhook URL (argument or webhook.public_url)".to_string()))?;
    let secret = secret.or_else(|| config.webhook.secret_token.clone());

    let client = TelegramClient::new(telegram.into_secret(), &config.telegram)?;
    client.set_webhook(&url, secret.as_deref()).await?;
    tracing::info!(%url, with_secret = secret.is_some(), "Webhook registered");

    if json {
        let out = serde_json::json!({
            "webhook": url,
            "secret_token": secret.is_some(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!(
            "  {} Webhook set to {}",
            style("✓").green(),
            style(&url).cyan()
        );
    }
    Ok(())
}

/// Remove the webhook registration.
pub async fn delete_webhook(config: &NoshConfig, telegram: TelegramArgs, json: bool) -> Result<()> {
    let client = TelegramClient::new(telegram.into_secret(), &config.telegram)?;
    client.delete_webhook().await?;
    tracing::info!("Webhook deleted");

    if json {
        println!("{}", serde_json::json!({ "webhook": null }));
    } else {
        println!("  {} Webhook deleted", style("✓").green());
    }
    Ok(())
}

//! Nosh CLI and webhook server entry point.
//!
//! Binary name: `nosh`
//!
//! Parses CLI arguments, initializes tracing and configuration, then
//! dispatches to the command handler.

mod cli;
mod http;
mod state;
mod sweeper;

use anyhow::anyhow;
use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands, WebhookCommand};
use nosh_infra::config::{load_config, resolve_config_path};
use nosh_observe::tracing_setup::{
    TracingOptions, filter_for_verbosity, init_tracing, shutdown_tracing,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need tracing or config
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "nosh", &mut std::io::stdout());
        return Ok(());
    }

    let options = TracingOptions::new(filter_for_verbosity(cli.verbose, cli.quiet))
        .json(cli.json)
        .otel(cli.otel);
    init_tracing(&options).map_err(|e| anyhow!("failed to initialize tracing: {e}"))?;

    let config_path = resolve_config_path(cli.config.as_deref())?;
    let config = load_config(&config_path).await;

    let result = match cli.command {
        Commands::Serve(args) => cli::serve::serve(config, args, cli.quiet).await,

        Commands::Whoami { telegram } => cli::bot::whoami(&config, telegram, cli.json).await,

        Commands::Webhook { action } => match action {
            WebhookCommand::Set {
                url,
                secret,
                telegram,
            } => cli::bot::set_webhook(&config, telegram, url, secret, cli.json).await,
            WebhookCommand::Delete { telegram } => {
                cli::bot::delete_webhook(&config, telegram, cli.json).await
            }
        },

        Commands::Completions { .. } => unreachable!("handled above"),
    };

    shutdown_tracing();
    result
}

//! The `swatch` binary: serves the list application and manages its config.

mod cli;
mod config_handlers;

use anyhow::{Context, Result};
use clap::Parser;
use swatch_api::Server;
use swatch_core::SwatchConfig;
use tracing_subscriber::EnvFilter;

use cli::{Args, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Some(Command::Config { action }) => {
            config_handlers::handle_config_command(
                args.config.as_deref(),
                action,
                &mut std::io::stdout().lock(),
            )?;
            Ok(())
        }
        Some(Command::Serve { port }) => serve(args.config.as_deref(), port).await,
        None => serve(args.config.as_deref(), None).await,
    }
}

async fn serve(config_path: Option<&str>, port: Option<u16>) -> Result<()> {
    let mut config = SwatchConfig::load(config_path).context("loading configuration")?;
    if let Some(port) = port {
        config.server.port = port;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        store = config.store.backend.as_str(),
        "Starting swatch"
    );

    let server = Server::from_config(&config)
        .await
        .context("building server")?;
    server.run().await?;
    Ok(())
}

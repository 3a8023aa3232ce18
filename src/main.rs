mod cli;
mod config;
mod error;
mod service;

#[cfg(test)]
mod tests;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = cli::Cli::parse();
    let mode = cli.mode();

    let config = config::Config::load(cli.config.as_deref())?;
    config.validate(mode)?;

    tracing::info!(
        ?mode,
        channels = config.digest.channel_handles().len(),
        source = ?config.source.kind,
        lookback_hours = config.digest.lookback_hours,
        "starting digest run"
    );

    let stats = service::run(config, mode).await?;

    tracing::info!(
        channels = stats.channels,
        messages = stats.messages,
        prompt_chars = stats.prompt_chars,
        summary_chars = stats.summary_chars,
        "digest run finished"
    );

    Ok(())
}

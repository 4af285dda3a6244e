mod cli;
mod commands;
mod config;
mod logging;
mod output;
mod paths;

use std::str::FromStr;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use log::info;
use log::warn;
use simplelog::LevelFilter;
use trends_lib::TrendsClient;
use trends_lib::provider::GoogleTrendsProvider;

use crate::cli::Cli;
use crate::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, source) = match &cli.config {
        Some(path) => (Config::load_from_path(path)?, Some(path.clone())),
        None => Config::load()?,
    };

    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    let level = LevelFilter::from_str(level)
        .with_context(|| format!("Invalid log level: {}", level))?;
    logging::init(level)?;

    match &source {
        Some(path) => info!("Loaded config from {}", path.display()),
        None => info!("No config file found, using defaults"),
    }

    let provider = GoogleTrendsProvider::new(config.provider_config())?;
    let client = TrendsClient::builder()
        .provider(provider)
        .cache_config(config.cache_config())
        .retry(config.retry_config())
        .max_concurrent_requests(config.provider.max_concurrent_requests)
        .build();
    if trends_lib::init_shared_client(client).is_err() {
        warn!("Shared client already initialized, ignoring configured client");
    }

    commands::run(cli.command, &config).await
}

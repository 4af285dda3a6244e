//! Subcommand handlers.

use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use chrono::Duration;
use chrono::Utc;
use log::info;
use trends_lib::model::country_name;
use trends_lib::query::normalize;

use crate::cli::Commands;
use crate::cli::ConfigCommands;
use crate::cli::InterestArgs;
use crate::config::Config;
use crate::output;

/// Days covered when no start date is given.
const DEFAULT_SPAN_DAYS: i64 = 90;

pub async fn run(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Interest(args) => interest(args).await,
        Commands::Related { keyword, country } => related(&keyword, &country).await,
        Commands::Countries => {
            print!("{}", output::render_countries());
            Ok(())
        }
        Commands::Config { command } => config_command(command, config),
    }
}

async fn interest(args: InterestArgs) -> Result<()> {
    let end = args.end.unwrap_or_else(|| Utc::now().date_naive());
    let start = args.start.unwrap_or(end - Duration::days(DEFAULT_SPAN_DAYS));

    let query = normalize(&args.keywords, &args.country, start, end)?;
    // Shown at every log level.
    eprint!("{}", output::render_warnings(query.warnings()));

    match country_name(query.country()) {
        Some(name) => info!("Fetching {} in {} ({})", query.timeframe(), name, query.country()),
        None => info!("Fetching {} for country code {}", query.timeframe(), query.country()),
    }

    let client = trends_lib::shared_client()?;
    let response = client.fetch_interest_over_time(&query).await?;
    if let Some(line) = output::describe_cache(&response.cache) {
        println!("{}", line);
    }

    let mut table = response.into_inner();
    if args.exclude_partial {
        table = table.without_partial();
    }
    print!("{}", output::render_table(&table));

    if let Some(path) = args.output {
        std::fs::write(&path, table.to_csv())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Saved {} rows to {}", table.len(), path.display());
    }
    Ok(())
}

async fn related(keyword: &str, country: &str) -> Result<()> {
    let client = trends_lib::shared_client()?;
    let response = client.fetch_related_queries(keyword, country).await?;
    if let Some(line) = output::describe_cache(&response.cache) {
        println!("{}", line);
    }
    print!("{}", output::render_related(response.data()));
    Ok(())
}

fn config_command(command: ConfigCommands, config: &Config) -> Result<()> {
    match command {
        ConfigCommands::Init { force } => {
            let path = Config::default_config_path();
            if path.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", path.display());
            }
            Config::default().save_to_path(&path)?;
            println!("Config written to {}", path.display());
        }
        ConfigCommands::Show => print!("{}", config.to_toml()?),
    }
    Ok(())
}

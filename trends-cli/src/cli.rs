//! Command-line arguments.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use clap::Parser;
use clap::Subcommand;

/// File name used when `--output` is given without a value.
pub const DEFAULT_CSV: &str = "google_trends_data.csv";

/// Explore search interest over time for up to five keywords.
#[derive(Parser)]
#[command(name = "trends")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to ./trends.toml, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Terminal log level, overrides the config file
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interest over time for up to five keywords
    #[command(alias = "i")]
    Interest(InterestArgs),

    /// Top and rising queries related to a keyword
    #[command(alias = "r")]
    Related {
        /// Keyword to look up
        #[arg(short, long)]
        keyword: String,

        /// Country code
        #[arg(short, long, default_value = "FR")]
        country: String,
    },

    /// List supported countries
    Countries,

    /// Manage the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Args)]
pub struct InterestArgs {
    /// Keyword to compare (repeat up to five times)
    #[arg(short = 'k', long = "keyword", required = true)]
    pub keywords: Vec<String>,

    /// Country code
    #[arg(short, long, default_value = "FR")]
    pub country: String,

    /// First day (YYYY-MM-DD), defaults to 90 days before the end
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last day (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Write the table as CSV
    #[arg(short, long, num_args = 0..=1, default_missing_value = DEFAULT_CSV)]
    pub output: Option<PathBuf>,

    /// Drop the provider's partial (still collecting) rows
    #[arg(long)]
    pub exclude_partial: bool,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Write the default config to the user config dir
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective config
    Show,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interest_args() {
        let cli = Cli::try_parse_from([
            "trends", "interest", "-k", "cat", "-k", "dog", "--country", "US", "--start",
            "2024-01-01", "--end", "2024-03-31", "-o",
        ])
        .unwrap();

        let Commands::Interest(args) = cli.command else {
            panic!("expected interest command");
        };
        assert_eq!(args.keywords, ["cat", "dog"]);
        assert_eq!(args.country, "US");
        assert_eq!(args.start, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(args.output, Some(PathBuf::from(DEFAULT_CSV)));
    }

    #[test]
    fn test_interest_defaults() {
        let cli = Cli::try_parse_from(["trends", "i", "-k", "cat"]).unwrap();

        let Commands::Interest(args) = cli.command else {
            panic!("expected interest command");
        };
        assert_eq!(args.country, "FR");
        assert!(args.start.is_none());
        assert!(args.output.is_none());
        assert!(!args.exclude_partial);
    }

    #[test]
    fn test_keyword_required() {
        assert!(Cli::try_parse_from(["trends", "interest"]).is_err());
    }

    #[test]
    fn test_invalid_date() {
        let args = ["trends", "interest", "-k", "cat", "--end", "31/03/2024"];
        assert!(Cli::try_parse_from(args).is_err());
    }
}

//! Logger setup.

use std::fs::File;

use anyhow::Context;
use anyhow::Result;
use simplelog::ColorChoice;
use simplelog::CombinedLogger;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::SharedLogger;
use simplelog::TermLogger;
use simplelog::TerminalMode;
use simplelog::WriteLogger;

use crate::paths;

/// Logs to stderr at `level` and, when the cache directory is writable, at
/// debug level to `latest.log`.
pub fn init(level: LevelFilter) -> Result<()> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    if let Some(file) = open_log_file() {
        loggers.push(WriteLogger::new(LevelFilter::Debug, Config::default(), file));
    }

    CombinedLogger::init(loggers).context("Failed to initialize logger")
}

fn open_log_file() -> Option<File> {
    let path = paths::log_file()?;
    std::fs::create_dir_all(path.parent()?).ok()?;
    paths::rotate_logs();
    File::create(path).ok()
}

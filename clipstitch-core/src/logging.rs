//! File logging setup.
//!
//! Installs log4rs as the global logger with a console appender on stderr and
//! a plain-text file appender. Only one global logger can exist, so callers
//! use this instead of (not in addition to) their console logger.

use anyhow::Result;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
};
use std::path::Path;

/// Line format of the log file.
pub const FILE_LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} [{l}] {m}{n}";

const CONSOLE_LOG_PATTERN: &str = "{h({l})} {m}{n}";

/// Name of the log file for a run started at `timestamp`.
#[must_use]
pub fn log_file_name(timestamp: &str) -> String {
    format!("clipstitch_run_{timestamp}.log")
}

/// Logs to stderr and to `log_file` at `log_level`, creating parent
/// directories as needed.
pub fn setup_file_logging(log_file: &Path, log_level: LevelFilter) -> Result<()> {
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(FILE_LOG_PATTERN)))
        .build(log_file)?;

    let console_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(CONSOLE_LOG_PATTERN)))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("console", Box::new(console_appender)))
        .appender(Appender::builder().build("file", Box::new(file_appender)))
        .build(
            Root::builder()
                .appender("console")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;

    Ok(())
}

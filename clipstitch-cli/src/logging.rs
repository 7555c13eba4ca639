// ============================================================================
// clipstitch-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP
//
// Console-only runs use env_logger. With --log-dir the core's log4rs setup is
// installed instead, since it logs to the console and the file at once.
// RUST_LOG still refines the console-only filter.

use crate::error::{CliErrorContext, CliResult};

use clipstitch_core::logging::{log_file_name, setup_file_logging};
use log::LevelFilter;
use std::path::{Path, PathBuf};

/// Returns the current local timestamp formatted as "YYYYMMDD_HHMMSS".
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Level for the `--verbose` flag.
#[must_use]
pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Installs the global logger. Returns the log file path when `log_dir` is set.
pub fn init_logging(verbose: bool, log_dir: Option<&Path>) -> CliResult<Option<PathBuf>> {
    let level = level_for(verbose);

    let Some(log_dir) = log_dir else {
        env_logger::Builder::new()
            .filter_level(level)
            .parse_default_env()
            .format_timestamp(None)
            .format_target(false)
            .try_init()
            .cli_context("Failed to initialize logging")?;
        return Ok(None);
    };

    let log_path = log_dir.join(log_file_name(&get_timestamp()));
    setup_file_logging(&log_path, level)
        .cli_with_context(|| format!("Failed to set up file logging in {}", log_dir.display()))?;
    Ok(Some(log_path))
}

// clipstitch-cli/src/cli.rs
//
// Defines the command-line argument structure using clap.

use clipstitch_core::config::DEFAULT_CONFIG_FILE;

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "clipstitch: merge a directory of video clips into one video",
    long_about = "Scans a directory for video clips, fixes their orientation, scales them to \
                  1280x720 and joins them newest first into a single file using ffmpeg."
)]
pub struct Cli {
    /// Show discovered files, ffmpeg commands and manifest contents
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// JSON configuration file
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Also write a timestamped log file into this directory
    #[arg(long, value_name = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["clipstitch"]);
        assert!(!cli.verbose);
        assert_eq!(cli.config, PathBuf::from("config.json"));
        assert_eq!(cli.log_dir, None);
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::parse_from(["clipstitch", "-v", "-c", "party.json", "--log-dir", "logs"]);
        assert!(cli.verbose);
        assert_eq!(cli.config, PathBuf::from("party.json"));
        assert_eq!(cli.log_dir, Some(PathBuf::from("logs")));
    }
}

// clipstitch-cli/src/main.rs
//
// Entry point of the `clipstitch` binary: parse arguments, set up logging,
// run the merge and report the outcome. Any failure prints a single
// `Error: ...` line on stderr and exits with status 1.

use clipstitch_cli::error::CliResult;
use clipstitch_cli::logging::init_logging;
use clipstitch_cli::output::{print_error, print_summary};
use clipstitch_cli::{Cli, run_merge};

use clap::Parser;
use log::info;
use std::process;

fn run(cli: Cli) -> CliResult<()> {
    if let Some(log_path) = init_logging(cli.verbose, cli.log_dir.as_deref())? {
        info!("Logging to {}", log_path.display());
    }

    let summary = run_merge(&cli)?;
    print_summary(&summary);
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        print_error(&e);
        process::exit(1);
    }
}

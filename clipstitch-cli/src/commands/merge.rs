//! Implementation of the merge run.
//!
//! Loads the JSON configuration and hands it to the core pipeline with the
//! real ffmpeg/ffprobe seams.

use crate::cli::Cli;
use crate::error::CliResult;

use clipstitch_core::external::{CommandFfprobeExecutor, SidecarSpawner};
use clipstitch_core::{NormalizeSettings, RunConfig, RunSummary, run_pipeline};

use log::{debug, info};

/// Runs one merge as described by the config file named on the command line.
pub fn run_merge(cli: &Cli) -> CliResult<RunSummary> {
    let config = RunConfig::from_file(&cli.config)?;
    debug!("Configuration: {:?}", config);

    info!(
        "Merging clips from {} into {}",
        config.input_directory.display(),
        config.output_file.display()
    );

    let settings = NormalizeSettings::default();
    run_pipeline(&SidecarSpawner, &CommandFfprobeExecutor, &config, &settings)
}

// ============================================================================
// clipstitch-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with ffmpeg and ffprobe
//
// This module encapsulates every interaction with the external media tools.
// The pipeline only talks to them through the traits defined here, so tests
// can substitute the mock implementations.
//
// KEY COMPONENTS:
// - FfmpegSpawner / FfmpegProcess: spawn and drive an ffmpeg process
// - FfprobeExecutor: query stream side data from ffprobe
// - FfmpegCommandBuilder / VideoFilterChain: command line construction
// - check_dependency: verifies a tool is on PATH before work starts

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult, command_start_error};

// ---- Standard library imports ----
use std::io;
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Builders for ffmpeg command lines and filter graphs
pub mod ffmpeg_builder;

/// Traits and implementations for executing ffmpeg commands
pub mod ffmpeg_executor;

/// Traits and implementations for executing ffprobe commands
pub mod ffprobe_executor;

#[cfg(any(test, feature = "test-mocks"))]
pub mod mocks;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ffmpeg_builder::{FfmpegCommandBuilder, VideoFilterChain};
pub use ffmpeg_executor::{FfmpegProcess, FfmpegSpawner, SidecarProcess, SidecarSpawner, run_ffmpeg};
pub use ffprobe_executor::{CommandFfprobeExecutor, FfprobeExecutor};

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks that an external command can be started.
///
/// Runs `<cmd_name> -version` with output discarded. Only a failure to start
/// the process counts; the exit status is not inspected.
///
/// # Returns
///
/// * `Ok(())` - if the command started
/// * `Err(CoreError::DependencyNotFound)` - if the command is not on PATH
/// * `Err(CoreError::CommandStart)` - if it exists but failed to start
pub fn check_dependency(cmd_name: &str) -> CoreResult<()> {
    let result = Command::new(cmd_name)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {}", cmd_name);
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{}' not found.", cmd_name);
            Err(CoreError::DependencyNotFound(cmd_name.to_string()))
        }
        Err(e) => {
            log::error!("Failed to start dependency check command '{}': {}", cmd_name, e);
            Err(command_start_error(cmd_name, e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_dependency_missing_command() {
        let result = check_dependency("clipstitch_surely_not_a_real_binary_42");
        assert!(matches!(result, Err(CoreError::DependencyNotFound(_))));
    }
}

//! FFprobe integration for stream side-data queries
//!
//! The only thing clipstitch needs from ffprobe is the side data of the first
//! video stream, emitted as flat `key=value` lines. Interpretation of that
//! text lives in `processing::rotation`.

use crate::error::{CoreResult, command_failed_error, command_start_error};
use std::path::Path;
use std::process::Command;

/// Trait for querying media metadata through ffprobe.
pub trait FfprobeExecutor {
    /// Returns the side-data entries of the first video stream as `key=value` lines.
    fn stream_side_data(&self, input_path: &Path) -> CoreResult<String>;
}

/// Concrete implementation spawning the `ffprobe` binary found on PATH.
#[derive(Debug, Clone, Default)]
pub struct CommandFfprobeExecutor;

impl CommandFfprobeExecutor {
    fn build_command(input_path: &Path) -> Command {
        let mut cmd = Command::new("ffprobe");
        cmd.args(["-v", "error"])
            .args(["-select_streams", "v:0"])
            .args(["-show_entries", "stream=side_data_list"])
            .args(["-of", "default=noprint_wrappers=1"])
            .arg(input_path);
        cmd
    }
}

impl FfprobeExecutor for CommandFfprobeExecutor {
    fn stream_side_data(&self, input_path: &Path) -> CoreResult<String> {
        let mut cmd = Self::build_command(input_path);
        log::debug!("Running ffprobe for side data on: {}", input_path.display());

        let output = cmd
            .output()
            .map_err(|e| command_start_error("ffprobe", e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(command_failed_error(
                "ffprobe",
                output.status,
                stderr.trim().to_string(),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn test_ffprobe_command_selects_first_video_stream() {
        let cmd = CommandFfprobeExecutor::build_command(Path::new("/videos/clip.mov"));
        let args: Vec<&OsStr> = cmd.get_args().collect();

        assert_eq!(cmd.get_program(), "ffprobe");
        assert!(args.contains(&OsStr::new("v:0")));
        assert!(args.contains(&OsStr::new("stream=side_data_list")));
        assert!(args.contains(&OsStr::new("default=noprint_wrappers=1")));
        assert_eq!(args.last(), Some(&OsStr::new("/videos/clip.mov")));
    }
}

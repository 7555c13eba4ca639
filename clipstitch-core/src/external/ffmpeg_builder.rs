//! FFmpeg command builder utilities
//!
//! This module provides a builder pattern for constructing FFmpeg commands
//! with the common options every clipstitch invocation shares, plus a small
//! builder for comma-separated video filter chains.

use ffmpeg_sidecar::command::FfmpegCommand;

/// Builder for creating `FFmpeg` commands with common configurations
pub struct FfmpegCommandBuilder {
    cmd: FfmpegCommand,
}

impl Default for FfmpegCommandBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FfmpegCommandBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cmd: FfmpegCommand::new(),
        }
    }

    /// Builds the command with `-hide_banner` and `-y` (overwrite) applied
    #[must_use]
    pub fn build(mut self) -> FfmpegCommand {
        self.cmd.arg("-hide_banner").arg("-y");
        self.cmd
    }
}

/// Builder for constructing video filter chains
#[derive(Default)]
pub struct VideoFilterChain {
    filters: Vec<String>,
}

impl VideoFilterChain {
    /// Creates a new empty filter chain
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a `transpose` filter (1 = clockwise, 2 = counter-clockwise)
    #[must_use]
    pub fn add_transpose(mut self, direction: u8) -> Self {
        self.filters.push(format!("transpose={direction}"));
        self
    }

    /// Scales down to fit inside `width`x`height` keeping the aspect ratio,
    /// then pads (centered) to exactly that size.
    #[must_use]
    pub fn add_fit_and_pad(mut self, width: u32, height: u32) -> Self {
        self.filters.push(format!(
            "scale={width}:{height}:force_original_aspect_ratio=decrease"
        ));
        self.filters
            .push(format!("pad={width}:{height}:(ow-iw)/2:(oh-ih)/2"));
        self
    }

    /// Builds the filter chain into a single filter string
    #[must_use]
    pub fn build(self) -> Option<String> {
        if self.filters.is_empty() {
            None
        } else {
            Some(self.filters.join(","))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_filter_chain_empty() {
        let chain = VideoFilterChain::new();
        assert_eq!(chain.build(), None);
    }

    #[test]
    fn test_fit_and_pad() {
        let chain = VideoFilterChain::new().add_fit_and_pad(1280, 720);
        assert_eq!(
            chain.build().as_deref(),
            Some("scale=1280:720:force_original_aspect_ratio=decrease,pad=1280:720:(ow-iw)/2:(oh-ih)/2")
        );
    }

    #[test]
    fn test_transposes_come_first_in_insertion_order() {
        let chain = VideoFilterChain::new()
            .add_transpose(2)
            .add_transpose(1)
            .add_fit_and_pad(640, 360);
        assert_eq!(
            chain.build().as_deref(),
            Some("transpose=2,transpose=1,scale=640:360:force_original_aspect_ratio=decrease,pad=640:360:(ow-iw)/2:(oh-ih)/2")
        );
    }

    #[test]
    fn test_builder_common_flags() {
        let cmd = FfmpegCommandBuilder::new().build();
        let args: Vec<String> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert!(args.contains(&"-hide_banner".to_string()));
        assert!(args.contains(&"-y".to_string()));
        assert_eq!(args.iter().filter(|a| *a == "-y").count(), 1);
        assert_eq!(args.iter().filter(|a| *a == "-hide_banner").count(), 1);
    }
}

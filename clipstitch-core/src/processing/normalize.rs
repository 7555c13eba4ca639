// ============================================================================
// clipstitch-core/src/processing/normalize.rs
// ============================================================================
//
// CLIP NORMALIZATION: Re-orient, Fit and Re-encode One Clip
//
// Every clip is turned into an artifact with the same frame size and codec
// profile, which is what allows the final join to be a plain stream copy.
//
// FILTER GRAPH:
//   [transpose=...,]scale=W:H:force_original_aspect_ratio=decrease,pad=W:H:(ow-iw)/2:(oh-ih)/2
//
// The transposes come from the clip's rotation (see Rotation::transposes);
// scale + pad letterboxes the result into the target frame.

// ---- Internal crate imports ----
use crate::config::NormalizeSettings;
use crate::discovery::ClipSource;
use crate::error::{CoreError, CoreResult};
use crate::external::{FfmpegCommandBuilder, FfmpegSpawner, VideoFilterChain, run_ffmpeg};
use crate::processing::rotation::Rotation;

// ---- External crate imports ----
use ffmpeg_sidecar::command::FfmpegCommand;

// ---- Standard library imports ----
use std::path::{Path, PathBuf};

/// A temporary artifact produced from one clip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedClip {
    /// Position of the source clip in scan order
    pub index: usize,
    pub path: PathBuf,
    pub source: ClipSource,
    pub rotation: Rotation,
}

/// Builds the `-vf` filter graph for a clip with the given rotation.
#[must_use]
pub fn build_filter_graph(rotation: Rotation, settings: &NormalizeSettings) -> String {
    let chain = rotation
        .transposes()
        .iter()
        .fold(VideoFilterChain::new(), |chain, &direction| chain.add_transpose(direction))
        .add_fit_and_pad(settings.width, settings.height);

    // add_fit_and_pad always contributes filters
    chain.build().unwrap_or_default()
}

/// Builds the full normalization command for one clip.
#[must_use]
pub fn build_normalize_command(
    input_path: &Path,
    output_path: &Path,
    rotation: Rotation,
    settings: &NormalizeSettings,
) -> FfmpegCommand {
    let mut cmd = FfmpegCommandBuilder::new().build();
    cmd.input(input_path);

    let filter_graph = build_filter_graph(rotation, settings);
    cmd.args(["-vf", filter_graph.as_str()]);

    cmd.args(["-c:v", settings.video_codec.as_str()]);
    cmd.args(["-crf", &settings.crf.to_string()]);
    cmd.args(["-preset", settings.preset.as_str()]);
    cmd.args(["-c:a", settings.audio_codec.as_str()]);
    cmd.args(["-b:a", settings.audio_bitrate.as_str()]);

    cmd.output(output_path);
    cmd
}

/// Re-encodes `source` into `output_path` and blocks until ffmpeg exits.
///
/// A spawn failure, a non-zero exit, or a missing/empty output file is an
/// error; the caller aborts the run on it.
pub fn normalize_clip<S: FfmpegSpawner>(
    spawner: &S,
    source: &ClipSource,
    index: usize,
    output_path: &Path,
    rotation: Rotation,
    settings: &NormalizeSettings,
) -> CoreResult<NormalizedClip> {
    log::debug!(
        "Normalizing {} (rotation {}) -> {}",
        source.path.display(),
        rotation,
        output_path.display()
    );

    let cmd = build_normalize_command(&source.path, output_path, rotation, settings);
    run_ffmpeg(spawner, cmd, "ffmpeg (normalize)")?;

    let produced = std::fs::metadata(output_path)
        .map(|m| m.len() > 0)
        .unwrap_or(false);
    if !produced {
        return Err(CoreError::MissingArtifact(output_path.to_path_buf()));
    }

    Ok(NormalizedClip {
        index,
        path: output_path.to_path_buf(),
        source: source.clone(),
        rotation,
    })
}

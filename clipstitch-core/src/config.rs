// ============================================================================
// clipstitch-core/src/config.rs
// ============================================================================
//
// CONFIGURATION: Run Configuration and Normalization Targets
//
// This module defines the run configuration loaded from the JSON config file
// and the fixed normalization target every clip is re-encoded to.
//
// KEY COMPONENTS:
// - RunConfig: input directory, output file, extension allow-list
// - NormalizeSettings: resolution/codec target shared by every clip
// - Default constants for the normalization target
//
// USAGE:
// The CLI calls `RunConfig::from_file`, then hands the config to
// `pipeline::run_pipeline`. The config is immutable for the run.

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult};

// ---- External crate imports ----
use serde::Deserialize;

// ---- Standard library imports ----
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

// ============================================================================
// DEFAULT CONSTANTS
// ============================================================================

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Target frame width after scale + pad.
pub const DEFAULT_TARGET_WIDTH: u32 = 1280;

/// Target frame height after scale + pad.
pub const DEFAULT_TARGET_HEIGHT: u32 = 720;

/// libx264 constant rate factor (0-51, lower is better quality).
pub const DEFAULT_CRF: u8 = 23;

/// libx264 speed preset.
pub const DEFAULT_PRESET: &str = "veryfast";

pub const DEFAULT_VIDEO_CODEC: &str = "libx264";
pub const DEFAULT_AUDIO_CODEC: &str = "aac";
pub const DEFAULT_AUDIO_BITRATE: &str = "192k";

// ============================================================================
// RUN CONFIGURATION
// ============================================================================

/// Configuration for a single merge run, as read from `config.json`.
///
/// ```json
/// {
///   "input_directory": "/media/party",
///   "output_file": "/media/party.mp4",
///   "allowed_extensions": [".mp4", ".mov"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Directory tree scanned for clips
    pub input_directory: PathBuf,

    /// Final merged video
    pub output_file: PathBuf,

    /// File name suffixes accepted by the scanner, matched case-sensitively
    pub allowed_extensions: Vec<String>,

    /// Base directory for the run's working directory (system temp dir if unset)
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,
}

impl RunConfig {
    /// Reads and parses a JSON config file.
    ///
    /// A missing file, malformed JSON or a missing required key are all
    /// reported as [`CoreError::Config`] so the caller can abort before any
    /// processing starts.
    pub fn from_file(path: &Path) -> CoreResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                CoreError::Config(format!("config file not found: {}", path.display()))
            } else {
                CoreError::Config(format!("cannot read {}: {}", path.display(), e))
            }
        })?;

        let config = Self::from_json(&contents)
            .map_err(|e| CoreError::Config(format!("{}: {}", path.display(), e)))?;
        log::debug!("Loaded configuration from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Parses a config from a JSON string.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let config: RunConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the fields serde cannot check.
    pub fn validate(&self) -> CoreResult<()> {
        if self.input_directory.as_os_str().is_empty() {
            return Err(CoreError::Config("input_directory must not be empty".to_string()));
        }
        if self.output_file.as_os_str().is_empty() {
            return Err(CoreError::Config("output_file must not be empty".to_string()));
        }
        Ok(())
    }

    /// Base directory under which the run directory is created.
    pub fn temp_base(&self) -> PathBuf {
        self.temp_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

// ============================================================================
// NORMALIZATION TARGET
// ============================================================================

/// Encode target shared by every clip in a run.
///
/// Stream-copy concatenation only works when every artifact has the same
/// codec profile, so one instance is used for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeSettings {
    pub width: u32,
    pub height: u32,
    pub video_codec: String,
    pub crf: u8,
    pub preset: String,
    pub audio_codec: String,
    pub audio_bitrate: String,
}

impl Default for NormalizeSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_TARGET_WIDTH,
            height: DEFAULT_TARGET_HEIGHT,
            video_codec: DEFAULT_VIDEO_CODEC.to_string(),
            crf: DEFAULT_CRF,
            preset: DEFAULT_PRESET.to_string(),
            audio_codec: DEFAULT_AUDIO_CODEC.to_string(),
            audio_bitrate: DEFAULT_AUDIO_BITRATE.to_string(),
        }
    }
}

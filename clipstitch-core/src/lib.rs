//! Core library for merging a directory of video clips into one file using
//! ffmpeg and ffprobe.
//!
//! A run scans a directory for clips, reads each clip's rotation metadata,
//! re-encodes every clip to a common orientation, frame size and codec
//! profile, then joins the results with a stream copy.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use clipstitch_core::{NormalizeSettings, RunConfig, run_pipeline};
//! use clipstitch_core::external::{CommandFfprobeExecutor, SidecarSpawner};
//! use std::path::Path;
//!
//! let config = RunConfig::from_file(Path::new("config.json")).unwrap();
//! let summary = run_pipeline(
//!     &SidecarSpawner,
//!     &CommandFfprobeExecutor,
//!     &config,
//!     &NormalizeSettings::default(),
//! )
//! .unwrap();
//! println!("Merged {} clips", summary.clips);
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod external;
pub mod logging;
pub mod pipeline;
pub mod processing;
pub mod temp_files;
pub mod utils;

// Re-exports for public API
pub use config::{NormalizeSettings, RunConfig};
pub use discovery::{ClipSource, find_clips};
pub use error::{CoreError, CoreResult};
pub use pipeline::{Pipeline, PipelineStage, RunSummary, run_pipeline};
pub use processing::{NormalizedClip, Rotation};
pub use utils::{format_bytes, format_duration};

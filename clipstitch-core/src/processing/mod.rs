//! Per-stage processing logic.
//!
//! Each submodule implements one step of a run; `pipeline` sequences them.

/// Rotation metadata inspection via ffprobe
pub mod rotation;

/// Re-orienting, fitting and re-encoding a single clip
pub mod normalize;

/// Concat-demuxer manifest writing and reading
pub mod manifest;

/// Stream-copy join of the normalized clips
pub mod concat;

/// Removal of temporary artifacts
pub mod cleanup;

pub use cleanup::{CleanupReport, cleanup};
pub use concat::concatenate;
pub use manifest::{read_manifest, write_manifest};
pub use normalize::{NormalizedClip, normalize_clip};
pub use rotation::{Rotation, detect_rotation};

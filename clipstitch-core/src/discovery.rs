//! File discovery module for finding the clips to merge.
//!
//! Walks the input directory recursively, keeps files (and symlinks to files)
//! whose name ends with one of the configured suffixes (case-sensitive, exact
//! match) and orders them by creation time, most recent first.

use crate::error::{CoreError, CoreResult};

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

/// A source video discovered by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipSource {
    pub path: PathBuf,
    /// Filesystem creation time (modification time where creation is unsupported)
    pub created: SystemTime,
}

impl ClipSource {
    pub fn new(path: PathBuf, created: SystemTime) -> Self {
        Self { path, created }
    }

    /// File name for log output.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Returns true if `file_name` ends with any of the allowed suffixes.
/// An empty suffix matches every name.
#[must_use]
pub fn has_allowed_suffix(file_name: &str, allowed_extensions: &[String]) -> bool {
    allowed_extensions
        .iter()
        .any(|ext| file_name.ends_with(ext.as_str()))
}

/// Sorts clips newest first. The sort is stable, so equal timestamps keep
/// their walk order.
pub fn order_newest_first(clips: &mut [ClipSource]) {
    clips.sort_by(|a, b| b.created.cmp(&a.created));
}

/// Finds every clip below `input_dir` matching the allow-list, newest first.
///
/// # Returns
///
/// * `Ok(Vec<ClipSource>)` - possibly empty; an empty allow-list always yields
///   an empty list
/// * `Err(CoreError::PathError)` - if `input_dir` is missing or not a directory
/// * `Err(CoreError::Walkdir)` - if the root itself cannot be read
///
/// Unreadable entries below the root are logged and skipped.
pub fn find_clips(input_dir: &Path, allowed_extensions: &[String]) -> CoreResult<Vec<ClipSource>> {
    if !input_dir.exists() {
        return Err(CoreError::PathError(format!(
            "Input directory does not exist: {}",
            input_dir.display()
        )));
    }
    if !input_dir.is_dir() {
        return Err(CoreError::PathError(format!(
            "{} is not a directory",
            input_dir.display()
        )));
    }

    if allowed_extensions.is_empty() {
        log::warn!("No allowed extensions configured; nothing will be collected");
        return Ok(Vec::new());
    }

    let mut clips = Vec::new();
    let mut skipped_count = 0;

    // Name-sorted walk so that ties in creation time resolve the same way on every run
    for entry_result in WalkDir::new(input_dir).sort_by_file_name() {
        let entry = match entry_result {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                log::warn!("Skipping unreadable entry during scan: {}", e);
                continue;
            }
        };

        if entry.file_type().is_dir() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        if !has_allowed_suffix(&file_name, allowed_extensions) {
            skipped_count += 1;
            continue;
        }

        // Follows symlinks, so a link to a clip reports the target's times
        let metadata = match fs::metadata(entry.path()) {
            Ok(metadata) => metadata,
            Err(e) => {
                log::warn!("Skipping {}: {}", entry.path().display(), e);
                continue;
            }
        };
        if !metadata.is_file() {
            continue;
        }
        if entry.path_is_symlink() {
            log::debug!("Following symlink {}", entry.path().display());
        }

        let created = metadata
            .created()
            .or_else(|_| metadata.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);

        log::debug!("Found video file: {}", entry.path().display());
        clips.push(ClipSource::new(entry.into_path(), created));
    }

    if skipped_count > 0 {
        log::debug!(
            "Skipped {} files without an allowed extension in {}",
            skipped_count,
            input_dir.display()
        );
    }

    order_newest_first(&mut clips);

    log::info!("Found {} clips in {}", clips.len(), input_dir.display());
    for (i, clip) in clips.iter().enumerate() {
        log::debug!("  {}. {}", i + 1, clip.path.display());
    }

    Ok(clips)
}

//! Temporary file management utilities.
//!
//! Every run owns one uniquely named working directory holding its normalized
//! artifacts and the concat manifest. The directory is a `tempfile::TempDir`,
//! so it is removed on drop even when the run aborts early; names inside it
//! are deterministic and index based.

use crate::error::CoreResult;
use std::path::{Path, PathBuf};
use tempfile::{Builder as TempFileBuilder, TempDir};

/// Prefix of every run directory.
pub const RUN_DIR_PREFIX: &str = "clipstitch_run_";

/// File name of the concat manifest inside the run directory.
pub const MANIFEST_FILE_NAME: &str = "concat_list.txt";

/// Container extension of normalized artifacts.
pub const ARTIFACT_EXTENSION: &str = "mp4";

/// Creates a uniquely named run directory under `base`. Auto-cleaned when dropped.
pub fn create_run_dir(base: &Path) -> CoreResult<TempDir> {
    std::fs::create_dir_all(base)?;

    Ok(TempFileBuilder::new()
        .prefix(RUN_DIR_PREFIX)
        .tempdir_in(base)?)
}

/// Path of the artifact for the clip at `index` in scan order. Does not create the file.
#[must_use]
pub fn artifact_path(run_dir: &Path, index: usize) -> PathBuf {
    run_dir.join(format!("clip_{index:04}.{ARTIFACT_EXTENSION}"))
}

/// Path of the run's concat manifest. Does not create the file.
#[must_use]
pub fn manifest_path(run_dir: &Path) -> PathBuf {
    run_dir.join(MANIFEST_FILE_NAME)
}

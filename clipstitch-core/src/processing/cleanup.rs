//! Best-effort removal of a run's temporary files.

use std::io;
use std::path::{Path, PathBuf};

/// Outcome of a cleanup pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleanupReport {
    /// Files deleted by this pass
    pub removed: usize,
    /// Files that could not be deleted
    pub failed: Vec<PathBuf>,
}

impl CleanupReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Deletes each path in turn. A file that is already gone counts as clean;
/// any other failure is logged and recorded, and the pass carries on.
pub fn cleanup<P: AsRef<Path>>(paths: &[P]) -> CleanupReport {
    let mut report = CleanupReport::default();

    for path in paths {
        let path = path.as_ref();
        match std::fs::remove_file(path) {
            Ok(()) => {
                log::debug!("Removed temporary file: {}", path.display());
                report.removed += 1;
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                log::warn!("Failed to remove temporary file {}: {}", path.display(), e);
                report.failed.push(path.to_path_buf());
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleanup_removes_files_and_tolerates_missing() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let a = dir.path().join("clip_0000.mp4");
        let b = dir.path().join("concat_list.txt");
        let never_created = dir.path().join("clip_0001.mp4");
        std::fs::write(&a, b"x")?;
        std::fs::write(&b, b"file 'x'")?;

        let report = cleanup(&[&a, &never_created, &b]);

        assert_eq!(report.removed, 2);
        assert!(report.is_clean());
        assert!(!a.exists());
        assert!(!b.exists());
        Ok(())
    }

    #[test]
    fn test_cleanup_continues_past_failures() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        // remove_file on a directory fails with something other than NotFound
        let stubborn = dir.path().join("not_a_file");
        std::fs::create_dir(&stubborn)?;
        let later = dir.path().join("clip_0002.mp4");
        std::fs::write(&later, b"x")?;

        let report = cleanup(&[stubborn.clone(), later.clone()]);

        assert_eq!(report.failed, vec![stubborn]);
        assert_eq!(report.removed, 1);
        assert!(!later.exists());
        Ok(())
    }
}

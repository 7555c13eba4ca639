//! Stream-copy concatenation of normalized clips.
//!
//! Uses ffmpeg's concat demuxer with `-safe 0` (manifest paths are absolute)
//! and `-c copy`, which only works because every artifact went through the
//! same normalization.

use crate::error::{CoreError, CoreResult};
use crate::external::{FfmpegCommandBuilder, FfmpegSpawner, run_ffmpeg};
use crate::processing::manifest::read_manifest;

use ffmpeg_sidecar::command::FfmpegCommand;
use std::path::Path;

/// Builds the concat command reading `manifest_path` and writing `output_path`.
#[must_use]
pub fn build_concat_command(manifest_path: &Path, output_path: &Path) -> FfmpegCommand {
    let mut cmd = FfmpegCommandBuilder::new().build();
    cmd.args(["-f", "concat"])
        .args(["-safe", "0"])
        .input(manifest_path)
        .args(["-c", "copy"])
        .output(output_path);
    cmd
}

/// Joins the artifacts listed in `manifest_path` into `output_path`.
///
/// Every listed artifact must exist before ffmpeg is started. The output's
/// parent directories are created as needed. Returns the output size in bytes.
pub fn concatenate<S: FfmpegSpawner>(
    spawner: &S,
    manifest_path: &Path,
    output_path: &Path,
) -> CoreResult<u64> {
    let artifacts = read_manifest(manifest_path)?;
    if artifacts.is_empty() {
        return Err(CoreError::ManifestParse(format!(
            "{} lists no clips",
            manifest_path.display()
        )));
    }
    if let Some(missing) = artifacts.iter().find(|p| !p.is_file()) {
        return Err(CoreError::MissingArtifact(missing.clone()));
    }

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    log::info!(
        "Concatenating {} clips into {}",
        artifacts.len(),
        output_path.display()
    );

    let cmd = build_concat_command(manifest_path, output_path);
    run_ffmpeg(spawner, cmd, "ffmpeg (concat)")?;

    let size = std::fs::metadata(output_path).map(|m| m.len()).unwrap_or(0);
    if size == 0 {
        return Err(CoreError::MissingArtifact(output_path.to_path_buf()));
    }
    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::mocks::MockFfmpegSpawner;
    use crate::processing::manifest::write_manifest;
    use std::path::PathBuf;

    #[test]
    fn test_concat_command_uses_stream_copy() {
        let cmd = build_concat_command(Path::new("/run/concat_list.txt"), Path::new("/out/merged.mp4"));
        let args: Vec<String> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        let joined = args.join(" ");

        assert!(joined.contains("-f concat -safe 0 -i /run/concat_list.txt -c copy"));
        assert!(args.iter().any(|a| a == "-y"));
        assert!(args.iter().any(|a| a == "-hide_banner"));
        assert_eq!(args.last().map(String::as_str), Some("/out/merged.mp4"));
    }

    #[cfg(unix)]
    #[test]
    fn test_concat_command_keeps_non_utf8_output_path() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let manifest = Path::new(OsStr::from_bytes(b"/run_\xff/concat_list.txt"));
        let output = Path::new(OsStr::from_bytes(b"/out/f\xeate.mp4"));
        let cmd = build_concat_command(manifest, output);

        let args: Vec<&OsStr> = cmd.get_args().collect();
        assert!(args.contains(&manifest.as_os_str()));
        assert_eq!(args.last().copied(), Some(output.as_os_str()));
    }

    fn prepare_run(dir: &Path, count: usize) -> PathBuf {
        let artifacts: Vec<PathBuf> = (0..count)
            .map(|i| {
                let p = dir.join(format!("clip_{i:04}.mp4"));
                std::fs::write(&p, b"normalized").unwrap();
                p
            })
            .collect();
        let manifest = dir.join("concat_list.txt");
        write_manifest(&manifest, &artifacts).unwrap();
        manifest
    }

    #[test]
    fn test_concatenate_creates_output_parent() -> Result<(), Box<dyn std::error::Error>> {
        let run_dir = tempfile::tempdir()?;
        let out_dir = tempfile::tempdir()?;
        let manifest = prepare_run(run_dir.path(), 2);
        let output = out_dir.path().join("nested/deeper/merged.mp4");

        let spawner = MockFfmpegSpawner::new();
        spawner.add_success_expectation("concat", vec![], true);

        let size = concatenate(&spawner, &manifest, &output)?;
        assert!(size > 0);
        assert!(output.exists());
        assert_eq!(spawner.get_captured_manifests().len(), 1);
        Ok(())
    }

    #[test]
    fn test_concatenate_refuses_missing_artifact() {
        let run_dir = tempfile::tempdir().unwrap();
        let manifest = prepare_run(run_dir.path(), 2);
        let gone = run_dir.path().join("clip_0001.mp4");
        std::fs::remove_file(&gone).unwrap();

        let spawner = MockFfmpegSpawner::new();
        let result = concatenate(&spawner, &manifest, &run_dir.path().join("out.mp4"));

        assert!(matches!(result, Err(CoreError::MissingArtifact(p)) if p == gone));
        assert!(spawner.get_received_calls().is_empty());
    }

    #[test]
    fn test_concatenate_reports_ffmpeg_failure() {
        let run_dir = tempfile::tempdir().unwrap();
        let manifest = prepare_run(run_dir.path(), 1);

        let spawner = MockFfmpegSpawner::new();
        spawner.add_exit_error_expectation("concat", vec![], 1);

        let result = concatenate(&spawner, &manifest, &run_dir.path().join("out.mp4"));
        assert!(matches!(result, Err(CoreError::CommandFailed(label, _, _)) if label == "ffmpeg (concat)"));
    }
}

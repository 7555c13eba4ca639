use assert_cmd::Command;
use predicates::str::contains;
use std::error::Error;
use std::fs;
use std::path::Path;
use tempfile::{TempDir, tempdir};

// Helper function to get the path to the compiled binary
fn clipstitch_cmd() -> Command {
    Command::cargo_bin("clipstitch").expect("Failed to find clipstitch binary")
}

/// Writes a config file for `input` and returns its path.
fn write_config(
    dir: &Path,
    input: &Path,
    output: &Path,
    allowed: &[&str],
    temp_dir: &Path,
) -> Result<std::path::PathBuf, Box<dyn Error>> {
    let config = serde_json::json!({
        "input_directory": input,
        "output_file": output,
        "allowed_extensions": allowed,
        "temp_dir": temp_dir,
    });
    let path = dir.join("config.json");
    fs::write(&path, serde_json::to_string_pretty(&config)?)?;
    Ok(path)
}

fn is_empty_dir(dir: &TempDir) -> Result<bool, Box<dyn Error>> {
    Ok(fs::read_dir(dir.path())?.next().is_none())
}

#[test]
fn test_help_lists_flags() {
    clipstitch_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("--config"))
        .stdout(contains("--verbose"))
        .stdout(contains("--log-dir"));
}

#[test]
fn test_missing_config_file_fails() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;

    clipstitch_cmd()
        .arg("--config")
        .arg(dir.path().join("missing.json"))
        .assert()
        .failure()
        .code(1)
        .stderr(contains("Error:"))
        .stderr(contains("config file not found"));
    Ok(())
}

#[test]
fn test_default_config_is_read_from_working_directory() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;

    // No config.json in the working directory
    clipstitch_cmd()
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(contains("config.json"));
    Ok(())
}

#[test]
fn test_malformed_config_fails() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let config = dir.path().join("config.json");
    fs::write(&config, "{ \"input_directory\": ")?;

    clipstitch_cmd()
        .arg("-c")
        .arg(&config)
        .assert()
        .failure()
        .code(1)
        .stderr(contains("Invalid configuration"));
    Ok(())
}

#[test]
fn test_config_missing_key_fails() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let config = dir.path().join("config.json");
    fs::write(
        &config,
        r#"{ "input_directory": "/tmp", "output_file": "/tmp/out.mp4" }"#,
    )?;

    clipstitch_cmd()
        .arg("-c")
        .arg(&config)
        .assert()
        .failure()
        .stderr(contains("allowed_extensions"));
    Ok(())
}

#[test]
fn test_missing_input_directory_fails() -> Result<(), Box<dyn Error>> {
    let work = tempdir()?;
    let temp_base = tempdir()?;
    let config = write_config(
        work.path(),
        &work.path().join("no_such_dir"),
        &work.path().join("out.mp4"),
        &[".mp4"],
        temp_base.path(),
    )?;

    clipstitch_cmd()
        .arg("-c")
        .arg(&config)
        .assert()
        .failure()
        .stderr(contains("does not exist"));
    Ok(())
}

#[test]
fn test_empty_directory_is_a_successful_no_op() -> Result<(), Box<dyn Error>> {
    let work = tempdir()?;
    let input = tempdir()?;
    let temp_base = tempdir()?;
    let output = work.path().join("merged.mp4");
    let config = write_config(work.path(), input.path(), &output, &[".mp4", ".mov"], temp_base.path())?;

    clipstitch_cmd()
        .arg("-c")
        .arg(&config)
        .assert()
        .success()
        .stdout(contains("nothing was written"));

    assert!(!output.exists());
    assert!(is_empty_dir(&temp_base)?);
    Ok(())
}

#[test]
fn test_empty_allow_list_is_a_successful_no_op() -> Result<(), Box<dyn Error>> {
    let work = tempdir()?;
    let input = tempdir()?;
    let temp_base = tempdir()?;
    fs::write(input.path().join("a.mp4"), b"not really video")?;
    let output = work.path().join("merged.mp4");
    let config = write_config(work.path(), input.path(), &output, &[], temp_base.path())?;

    clipstitch_cmd().arg("-c").arg(&config).assert().success();

    assert!(!output.exists());
    assert!(is_empty_dir(&temp_base)?);
    Ok(())
}

#[test]
fn test_disallowed_extensions_are_ignored() -> Result<(), Box<dyn Error>> {
    let work = tempdir()?;
    let input = tempdir()?;
    let temp_base = tempdir()?;
    fs::write(input.path().join("notes.txt"), b"hello")?;
    fs::write(input.path().join("clip.MP4"), b"wrong case")?;
    let output = work.path().join("merged.mp4");
    let config = write_config(work.path(), input.path(), &output, &[".mp4"], temp_base.path())?;

    clipstitch_cmd()
        .arg("-c")
        .arg(&config)
        .arg("--verbose")
        .assert()
        .success();

    assert!(!output.exists());
    assert!(is_empty_dir(&temp_base)?);
    Ok(())
}

#[test]
fn test_log_dir_receives_timestamped_log() -> Result<(), Box<dyn Error>> {
    let work = tempdir()?;
    let input = tempdir()?;
    let temp_base = tempdir()?;
    let log_dir = work.path().join("logs");
    let config = write_config(
        work.path(),
        input.path(),
        &work.path().join("merged.mp4"),
        &[".mp4"],
        temp_base.path(),
    )?;

    clipstitch_cmd()
        .arg("-c")
        .arg(&config)
        .arg("--log-dir")
        .arg(&log_dir)
        .assert()
        .success();

    let logs: Vec<_> = fs::read_dir(&log_dir)?
        .filter_map(Result::ok)
        .map(|e| e.path())
        .collect();
    assert_eq!(logs.len(), 1);
    let name = logs[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("clipstitch_run_") && name.ends_with(".log"), "{name}");
    assert!(fs::read_to_string(&logs[0])?.contains("nothing to merge"));
    Ok(())
}

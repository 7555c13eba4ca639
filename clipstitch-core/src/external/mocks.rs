// clipstitch-core/src/external/mocks.rs

// --- Mocking Infrastructure (for testing) ---

// Compiled for the crate's own unit tests and, through the "test-mocks"
// feature, for downstream test code.

use super::{FfmpegProcess, FfmpegSpawner, FfprobeExecutor};
use crate::error::{CoreError, CoreResult, command_failed_error};
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::rc::Rc;

/// Builds an `ExitStatus` carrying the given exit code.
#[cfg(unix)]
pub fn mock_exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

/// Builds an `ExitStatus` carrying the given exit code.
#[cfg(windows)]
pub fn mock_exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    ExitStatus::from_raw(code as u32)
}

/// Mock implementation of FfmpegProcess.
#[derive(Clone)]
pub struct MockFfmpegProcess {
    /// Events to emit when handle_events is called.
    pub events_to_emit: Rc<RefCell<Vec<FfmpegEvent>>>,
    /// Exit status to return when wait is called.
    pub exit_status: ExitStatus,
}

impl FfmpegProcess for MockFfmpegProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        let events = self.events_to_emit.borrow().clone();
        for event in events {
            handler(event)?;
        }
        Ok(())
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        Ok(self.exit_status)
    }
}

/// Represents an expected ffmpeg command call and its mock result.
pub struct MockFfmpegExpectation {
    pub arg_pattern: String,
    pub result: CoreResult<MockFfmpegProcess>,
    pub create_dummy_output: bool,
}

/// Mock implementation of FfmpegSpawner supporting multiple expectations.
///
/// Expectations are consumed in insertion order by the first call with an
/// argument containing the pattern. When a concat call is spawned, the
/// manifest named after `-i` is read and kept, since the pipeline deletes it
/// before the test can look.
#[derive(Clone, Default)]
pub struct MockFfmpegSpawner {
    expectations: Rc<RefCell<Vec<MockFfmpegExpectation>>>,
    received_calls: Rc<RefCell<Vec<Vec<String>>>>,
    captured_manifests: Rc<RefCell<Vec<String>>>,
}

impl MockFfmpegSpawner {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn add_expectation(
        &self,
        arg_pattern: &str,
        result: CoreResult<MockFfmpegProcess>,
        create_dummy_output: bool,
    ) {
        self.expectations.borrow_mut().push(MockFfmpegExpectation {
            arg_pattern: arg_pattern.to_string(),
            result,
            create_dummy_output,
        });
    }

    pub fn add_success_expectation(
        &self,
        arg_pattern: &str,
        events: Vec<FfmpegEvent>,
        create_dummy_output: bool,
    ) {
        let process = MockFfmpegProcess {
            events_to_emit: Rc::new(RefCell::new(events)),
            exit_status: mock_exit_status(0),
        };
        self.add_expectation(arg_pattern, Ok(process), create_dummy_output);
    }

    pub fn add_spawn_error_expectation(&self, arg_pattern: &str, error: CoreError) {
        self.add_expectation(arg_pattern, Err(error), false);
    }

    pub fn add_exit_error_expectation(
        &self,
        arg_pattern: &str,
        events: Vec<FfmpegEvent>,
        exit_code: i32,
    ) {
        let process = MockFfmpegProcess {
            events_to_emit: Rc::new(RefCell::new(events)),
            exit_status: mock_exit_status(exit_code),
        };
        self.add_expectation(arg_pattern, Ok(process), false);
    }

    pub fn get_received_calls(&self) -> Vec<Vec<String>> {
        self.received_calls.borrow().clone()
    }

    /// Manifest contents seen by each concat call, in call order.
    pub fn get_captured_manifests(&self) -> Vec<String> {
        self.captured_manifests.borrow().clone()
    }

    pub fn remaining_expectations(&self) -> usize {
        self.expectations.borrow().len()
    }

    fn capture_manifest(&self, args: &[String]) {
        if !args.iter().any(|a| a == "concat") {
            return;
        }
        let manifest = args
            .iter()
            .position(|a| a == "-i")
            .and_then(|i| args.get(i + 1));
        if let Some(manifest) = manifest {
            match std::fs::read_to_string(manifest) {
                Ok(contents) => self.captured_manifests.borrow_mut().push(contents),
                Err(e) => log::error!("MockFfmpegSpawner failed to read manifest {}: {}", manifest, e),
            }
        }
    }
}

impl FfmpegSpawner for MockFfmpegSpawner {
    type Process = MockFfmpegProcess;

    fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        let raw_output = cmd.get_args().last().map(PathBuf::from);
        let args: Vec<String> = cmd
            .get_args()
            .map(|s| s.to_string_lossy().into_owned())
            .collect();
        self.received_calls.borrow_mut().push(args.clone());
        self.capture_manifest(&args);

        let mut expectations = self.expectations.borrow_mut();
        let found_index = expectations
            .iter()
            .position(|exp| args.iter().any(|arg| arg.contains(&exp.arg_pattern)));

        let Some(index) = found_index else {
            panic!("MockFfmpegSpawner: No expectation found for command args: {:?}", args);
        };

        let expectation = expectations.remove(index);
        log::info!(
            "MockFfmpegSpawner: Matched expectation with pattern '{}'",
            expectation.arg_pattern
        );

        if expectation.result.is_ok() && expectation.create_dummy_output {
            if let Some(output_path) = raw_output {
                if let Some(parent) = output_path.parent() {
                    let _ = std::fs::create_dir_all(parent);
                }
                if let Err(e) = std::fs::write(&output_path, b"mock media") {
                    log::error!(
                        "MockFfmpegSpawner failed to create dummy output file {:?}: {}",
                        output_path,
                        e
                    );
                }
            }
        }

        expectation.result
    }
}

/// Mock implementation of FfprobeExecutor.
///
/// Paths without an expectation behave like an ffprobe failure.
#[derive(Clone, Default)]
pub struct MockFfprobeExecutor {
    side_data_results: Rc<RefCell<HashMap<PathBuf, Result<String, String>>>>,
    received_paths: Rc<RefCell<Vec<PathBuf>>>,
}

impl MockFfprobeExecutor {
    pub fn new() -> Self {
        Default::default()
    }

    /// Add the side-data text ffprobe should report for `input_path`.
    pub fn expect_side_data(&self, input_path: &Path, output: &str) {
        self.side_data_results
            .borrow_mut()
            .insert(input_path.to_path_buf(), Ok(output.to_string()));
    }

    /// Make ffprobe fail for `input_path`.
    pub fn expect_failure(&self, input_path: &Path, message: &str) {
        self.side_data_results
            .borrow_mut()
            .insert(input_path.to_path_buf(), Err(message.to_string()));
    }

    pub fn get_received_paths(&self) -> Vec<PathBuf> {
        self.received_paths.borrow().clone()
    }
}

impl FfprobeExecutor for MockFfprobeExecutor {
    fn stream_side_data(&self, input_path: &Path) -> CoreResult<String> {
        self.received_paths.borrow_mut().push(input_path.to_path_buf());
        match self.side_data_results.borrow().get(input_path) {
            Some(Ok(output)) => Ok(output.clone()),
            Some(Err(message)) => Err(command_failed_error(
                "ffprobe",
                mock_exit_status(1),
                message.clone(),
            )),
            None => Err(CoreError::OperationFailed(format!(
                "MockFfprobeExecutor: No expectation set for path {}",
                input_path.display()
            ))),
        }
    }
}

// ============================================================================
// clipstitch-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Core Error Type and Constructors
//
// This module defines the single error type used across clipstitch-core and
// a handful of helper functions for building the external-process variants
// with consistent messages.
//
// KEY COMPONENTS:
// - CoreError: every failure the pipeline can surface
// - CoreResult: result alias used throughout the crate
// - command_*_error: constructors for ffmpeg/ffprobe process failures

// ---- External crate imports ----
use thiserror::Error;

// ---- Standard library imports ----
use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

// ============================================================================
// ERROR TYPE
// ============================================================================

/// Errors produced by clipstitch-core.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Directory traversal failed: {0}")]
    Walkdir(#[from] walkdir::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Path error: {0}")]
    PathError(String),

    #[error("Required dependency '{0}' not found on PATH")]
    DependencyNotFound(String),

    #[error("Failed to start '{0}': {1}")]
    CommandStart(String, #[source] io::Error),

    #[error("Failed waiting for '{0}': {1}")]
    CommandWait(String, #[source] io::Error),

    #[error("'{0}' exited with {1}: {2}")]
    CommandFailed(String, ExitStatus, String),

    #[error("Expected artifact is missing or empty: {}", .0.display())]
    MissingArtifact(PathBuf),

    #[error("Path cannot be written to a concat manifest: {}", .0.display())]
    InvalidManifestPath(PathBuf),

    #[error("Malformed concat manifest: {0}")]
    ManifestParse(String),

    #[error("{0}")]
    OperationFailed(String),
}

/// Result type for clipstitch-core operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

// ============================================================================
// CONSTRUCTORS
// ============================================================================

/// Builds a [`CoreError::CommandStart`] for a process that could not be spawned.
pub fn command_start_error(command: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandStart(command.into(), err)
}

/// Builds a [`CoreError::CommandWait`] for a process whose exit could not be collected.
pub fn command_wait_error(command: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandWait(command.into(), err)
}

/// Builds a [`CoreError::CommandFailed`] for a process that exited unsuccessfully.
pub fn command_failed_error(
    command: impl Into<String>,
    status: ExitStatus,
    detail: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed(command.into(), status, detail.into())
}

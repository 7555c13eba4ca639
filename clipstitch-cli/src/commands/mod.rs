//! Command implementations for the CLI.

/// Loads the configuration and runs one merge.
pub mod merge;

//! Error types for the packager module.

use std::path::PathBuf;
use thiserror::Error;

use crate::process::ProcessError;

/// Errors that can occur while packing a release.
#[derive(Debug, Error)]
pub enum PackError {
    /// The content directory does not exist.
    #[error("Source directory not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// The source path has no final component to name the archive after.
    #[error("Source directory has no usable name: {path}")]
    InvalidSourceDir { path: PathBuf },

    /// The output directory could not be created.
    #[error("Failed to create output directory: {path}")]
    OutputDirectoryFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The archive tool could not be run.
    #[error("Failed to run archive tool")]
    Process(#[from] ProcessError),

    /// The archive tool exited with a non-zero status.
    #[error("Archive tool exited with {exit_code:?}: {stderr}")]
    CommandFailed {
        exit_code: Option<i32>,
        stderr: String,
    },
}

//! Error types for the distributor module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a distribution before any host is contacted.
///
/// Per-host failures are not errors at this level; they are reported in the
/// [`DistributionReport`](super::DistributionReport).
#[derive(Debug, Error)]
pub enum DistributeError {
    /// The archive does not exist locally.
    #[error("Archive not found: {path}")]
    ArchiveNotFound { path: PathBuf },

    /// No release folder name can be derived from the archive path.
    #[error("Cannot derive a release name from archive: {path}")]
    InvalidArchiveName { path: PathBuf },

    /// There is nowhere to deploy to.
    #[error("No hosts configured")]
    NoHosts,
}

//! Error types for the coordinator module.

use thiserror::Error;

use crate::distributor::{DistributeError, DistributionReport};
use crate::packager::PackError;

/// Ways a release run can fail.
#[derive(Debug, Error)]
pub enum CoordinatorError {
    /// The archive could not be built; no host was contacted.
    #[error("Packing failed")]
    Pack(#[from] PackError),

    /// Distribution could not start; no host was contacted.
    #[error("Distribution failed")]
    Distribute(#[from] DistributeError),

    /// Distribution ran but at least one host did not end up deployed.
    #[error(
        "Rollout of {} failed on {} of {} host(s)",
        .report.release,
        .report.failure_count(),
        .report.hosts.len()
    )]
    Rollout { report: DistributionReport },
}

impl CoordinatorError {
    /// The per-host report, when distribution got far enough to produce one.
    pub fn report(&self) -> Option<&DistributionReport> {
        match self {
            Self::Rollout { report } => Some(report),
            _ => None,
        }
    }
}

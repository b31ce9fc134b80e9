//! Types for the distributor module.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::remote::RemoteError;

/// What to do with the remaining hosts after one fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailurePolicy {
    /// Stop at the first failing host; later hosts are skipped.
    #[default]
    #[serde(rename = "stop")]
    StopOnError,
    /// Keep going and attempt every host.
    #[serde(rename = "continue")]
    ContinueOnError,
}

/// One step of a host rollout, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeployStep {
    Upload,
    CreateReleaseDir,
    Extract,
    RemoveStagedArchive,
    FlattenLayout,
    RemoveNestedDir,
    UnlinkCurrent,
    LinkCurrent,
}

impl DeployStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::CreateReleaseDir => "create_release_dir",
            Self::Extract => "extract",
            Self::RemoveStagedArchive => "remove_staged_archive",
            Self::FlattenLayout => "flatten_layout",
            Self::RemoveNestedDir => "remove_nested_dir",
            Self::UnlinkCurrent => "unlink_current",
            Self::LinkCurrent => "link_current",
        }
    }
}

impl fmt::Display for DeployStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Broad cause of a host failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The host could not be reached or the transport broke.
    Transport,
    /// A command ran on the host and failed.
    Command,
}

/// Why a host rollout stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostFailure {
    /// Step that failed.
    pub step: DeployStep,
    pub kind: FailureKind,
    pub message: String,
}

impl HostFailure {
    pub fn from_remote(step: DeployStep, error: &RemoteError) -> Self {
        Self {
            step,
            kind: if error.is_transport() {
                FailureKind::Transport
            } else {
                FailureKind::Command
            },
            message: error.to_string(),
        }
    }
}

/// Result of the rollout on one host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HostStatus {
    /// Every step succeeded and `current` points at the new release.
    Deployed,
    /// A step failed; the host is left as the last successful step made it.
    Failed(HostFailure),
    /// Not attempted because an earlier host failed.
    Skipped,
}

/// Per-host outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostOutcome {
    pub host: String,
    #[serde(flatten)]
    pub status: HostStatus,
    /// Time spent on this host.
    pub duration_ms: u64,
}

impl HostOutcome {
    pub fn is_deployed(&self) -> bool {
        matches!(self.status, HostStatus::Deployed)
    }
}

/// Outcome of distributing one archive to every host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionReport {
    /// Release folder name used on every host.
    pub release: String,
    /// One entry per configured host, in rollout order.
    pub hosts: Vec<HostOutcome>,
}

impl DistributionReport {
    /// Whether every host was deployed.
    pub fn is_success(&self) -> bool {
        !self.hosts.is_empty() && self.hosts.iter().all(HostOutcome::is_deployed)
    }

    /// Number of hosts that were not deployed, skipped ones included.
    pub fn failure_count(&self) -> usize {
        self.hosts.iter().filter(|h| !h.is_deployed()).count()
    }

    pub fn deployed(&self) -> impl Iterator<Item = &HostOutcome> {
        self.hosts.iter().filter(|h| h.is_deployed())
    }

    pub fn failed(&self) -> impl Iterator<Item = (&str, &HostFailure)> {
        self.hosts.iter().filter_map(|h| match &h.status {
            HostStatus::Failed(failure) => Some((h.host.as_str(), failure)),
            _ => None,
        })
    }

    pub fn skipped(&self) -> impl Iterator<Item = &HostOutcome> {
        self.hosts
            .iter()
            .filter(|h| matches!(h.status, HostStatus::Skipped))
    }

    /// Outcome for a given host.
    pub fn host(&self, host: &str) -> Option<&HostOutcome> {
        self.hosts.iter().find(|h| h.host == host)
    }
}

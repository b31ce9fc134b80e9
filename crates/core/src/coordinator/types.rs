//! Types for the coordinator module.

use serde::Serialize;
use std::fmt;

/// Where a coordinator is in its run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    #[default]
    Start,
    Packaging,
    PackFailed,
    Packaged,
    Distributing,
    DistributeFailed,
    Deployed,
}

impl RunState {
    /// Whether the run cannot progress any further.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::PackFailed | Self::DistributeFailed | Self::Deployed)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Start => "start",
            Self::Packaging => "packaging",
            Self::PackFailed => "pack_failed",
            Self::Packaged => "packaged",
            Self::Distributing => "distributing",
            Self::DistributeFailed => "distribute_failed",
            Self::Deployed => "deployed",
        };
        f.write_str(s)
    }
}

use serde::{Deserialize, Serialize};

use crate::distributor::{FailurePolicy, RemoteLayout};
use crate::packager::PackageConfig;
use crate::remote::RemoteConfig;

/// Root configuration
///
/// Every section is optional; an empty file deploys `web_static/` to the
/// default hosts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub package: PackageConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub layout: RemoteLayout,
    #[serde(default)]
    pub deploy: DeployConfig,
}

/// Rollout behaviour
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DeployConfig {
    /// What to do with the remaining hosts when one fails (default: stop)
    #[serde(default)]
    pub on_host_failure: FailurePolicy,
}

//! Distributor module for rolling a release out to every host.
//!
//! For each host, in order, the distributor:
//!
//! 1. uploads the archive to the staging directory
//! 2. creates `<root>/releases/<release>/`
//! 3. extracts the archive into it
//! 4. removes the staged archive
//! 5. moves the content up out of the nested `<content dir>/` and removes it
//! 6. replaces the `<root>/current` symlink with one to the new release
//!
//! Hosts are handled one after the other. A failing step ends that host's
//! rollout; what happens to the remaining hosts depends on the
//! [`FailurePolicy`]. Nothing is rolled back.
//!
//! # Example
//!
//! ```ignore
//! use webstatic_core::distributor::{Distributor, FailurePolicy, RemoteLayout};
//! use webstatic_core::remote::{RemoteConfig, SshExecutor};
//!
//! let config = RemoteConfig::default();
//! let distributor = Distributor::new(
//!     SshExecutor::new(config.clone()),
//!     config.hosts,
//!     RemoteLayout::default(),
//!     "web_static",
//! );
//!
//! let report = distributor
//!     .distribute(Path::new("versions/web_static_20240307104334.tgz"), FailurePolicy::StopOnError)
//!     .await?;
//! assert!(report.is_success());
//! ```

mod error;
mod layout;
mod plan;
mod rollout;
mod types;

pub use error::DistributeError;
pub use layout::RemoteLayout;
pub use plan::{ReleasePlan, RemoteCommand};
pub use rollout::Distributor;
pub use types::{
    DeployStep, DistributionReport, FailureKind, FailurePolicy, HostFailure, HostOutcome,
    HostStatus,
};

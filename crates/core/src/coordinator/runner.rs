//! Release coordinator implementation.

use std::path::{Path, PathBuf};
use tracing::{error, info};

use super::error::CoordinatorError;
use super::types::RunState;
use crate::distributor::{DistributionReport, Distributor, FailurePolicy};
use crate::packager::Packager;
use crate::remote::RemoteExecutor;

/// Sequences packing and distribution for one release.
pub struct ReleaseCoordinator<P: Packager, E: RemoteExecutor> {
    packager: P,
    distributor: Distributor<E>,
    policy: FailurePolicy,
    /// Archive produced by the first successful pack.
    archive: Option<PathBuf>,
    state: RunState,
}

impl<P: Packager, E: RemoteExecutor> ReleaseCoordinator<P, E> {
    /// Creates a coordinator that stops at the first failing host.
    pub fn new(packager: P, distributor: Distributor<E>) -> Self {
        Self {
            packager,
            distributor,
            policy: FailurePolicy::default(),
            archive: None,
            state: RunState::Start,
        }
    }

    /// Sets what happens to the remaining hosts when one fails.
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// The archive packed by this coordinator, if any.
    pub fn archive(&self) -> Option<&Path> {
        self.archive.as_deref()
    }

    pub fn packager(&self) -> &P {
        &self.packager
    }

    pub fn distributor(&self) -> &Distributor<E> {
        &self.distributor
    }

    /// Packs the content, or returns the archive packed earlier.
    pub async fn pack(&mut self) -> Result<PathBuf, CoordinatorError> {
        if let Some(ref archive) = self.archive {
            info!("Reusing archive {}", archive.display());
            return Ok(archive.clone());
        }

        self.state = RunState::Packaging;
        match self.packager.pack().await {
            Ok(archive) => {
                self.state = RunState::Packaged;
                self.archive = Some(archive.clone());
                Ok(archive)
            }
            Err(e) => {
                error!("Packing with {} failed: {}", self.packager.name(), e);
                self.state = RunState::PackFailed;
                Err(e.into())
            }
        }
    }

    /// Distributes an existing archive to every host.
    pub async fn deploy(&mut self, archive: &Path) -> Result<DistributionReport, CoordinatorError> {
        self.state = RunState::Distributing;

        let report = match self.distributor.distribute(archive, self.policy).await {
            Ok(report) => report,
            Err(e) => {
                error!("Distribution of {} failed: {}", archive.display(), e);
                self.state = RunState::DistributeFailed;
                return Err(e.into());
            }
        };

        if report.is_success() {
            info!(
                "Release {} deployed to {} host(s)",
                report.release,
                report.hosts.len()
            );
            self.state = RunState::Deployed;
            Ok(report)
        } else {
            self.state = RunState::DistributeFailed;
            Err(CoordinatorError::Rollout { report })
        }
    }

    /// Packs (once) and distributes.
    ///
    /// No host is contacted when packing fails.
    pub async fn run(&mut self) -> Result<DistributionReport, CoordinatorError> {
        let archive = self.pack().await?;
        self.deploy(&archive).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distributor::{HostStatus, RemoteLayout};
    use crate::packager::PackError;
    use crate::testing::{MockPackager, MockRemoteExecutor};
    use tempfile::TempDir;

    struct Harness {
        coordinator: ReleaseCoordinator<MockPackager, MockRemoteExecutor>,
        packager: MockPackager,
        executor: MockRemoteExecutor,
        _dir: TempDir,
    }

    fn harness(hosts: &[&str]) -> Harness {
        let dir = TempDir::new().unwrap();
        let packager = MockPackager::new(dir.path().join("web_static_20240307104334.tgz"));
        let executor = MockRemoteExecutor::new();
        let distributor = Distributor::new(
            executor.clone(),
            hosts.iter().map(|h| h.to_string()).collect(),
            RemoteLayout::default(),
            "web_static",
        );
        Harness {
            coordinator: ReleaseCoordinator::new(packager.clone(), distributor),
            packager,
            executor,
            _dir: dir,
        }
    }

    #[tokio::test]
    async fn test_pack_is_cached() {
        let mut h = harness(&["a"]);

        let first = h.coordinator.pack().await.unwrap();
        let second = h.coordinator.pack().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(h.packager.pack_count().await, 1);
        assert_eq!(h.coordinator.archive(), Some(first.as_path()));
        assert_eq!(h.coordinator.state(), RunState::Packaged);
    }

    #[tokio::test]
    async fn test_failed_pack_is_not_cached() {
        let mut h = harness(&["a"]);
        h.packager
            .set_next_error(PackError::CommandFailed {
                exit_code: Some(2),
                stderr: "tar: web_static: Cannot stat".to_string(),
            })
            .await;

        assert!(h.coordinator.pack().await.is_err());
        assert_eq!(h.coordinator.state(), RunState::PackFailed);
        assert!(h.coordinator.archive().is_none());

        assert!(h.coordinator.pack().await.is_ok());
        assert_eq!(h.packager.pack_count().await, 2);
    }

    #[tokio::test]
    async fn test_run_deploys_every_host() {
        let mut h = harness(&["a", "b"]);

        let report = h.coordinator.run().await.unwrap();

        assert!(report.is_success());
        assert_eq!(report.release, "web_static_20240307104334");
        assert_eq!(h.coordinator.state(), RunState::Deployed);
        assert_eq!(h.executor.upload_count().await, 2);
    }

    #[tokio::test]
    async fn test_run_pack_failure_contacts_no_host() {
        let mut h = harness(&["a", "b"]);
        h.packager
            .set_next_error(PackError::CommandFailed {
                exit_code: Some(2),
                stderr: String::new(),
            })
            .await;

        let result = h.coordinator.run().await;

        assert!(matches!(result, Err(CoordinatorError::Pack(_))));
        assert_eq!(h.coordinator.state(), RunState::PackFailed);
        assert!(h.executor.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_run_reuses_archive_across_runs() {
        let mut h = harness(&["a"]);

        h.coordinator.run().await.unwrap();
        h.coordinator.run().await.unwrap();

        assert_eq!(h.packager.pack_count().await, 1);
        assert_eq!(h.executor.upload_count().await, 2);
    }

    #[tokio::test]
    async fn test_run_partial_rollout_failure() {
        let mut h = harness(&["a", "b"]);
        h.executor.fail_command("b", "ln -s").await;

        let err = h.coordinator.run().await.unwrap_err();

        assert_eq!(h.coordinator.state(), RunState::DistributeFailed);
        let report = err.report().unwrap();
        assert!(report.host("a").unwrap().is_deployed());
        assert!(matches!(
            report.host("b").unwrap().status,
            HostStatus::Failed(_)
        ));
        assert_eq!(
            err.to_string(),
            "Rollout of web_static_20240307104334 failed on 1 of 2 host(s)"
        );
    }

    #[tokio::test]
    async fn test_deploy_missing_archive() {
        let mut h = harness(&["a"]);

        let result = h.coordinator.deploy(Path::new("/nonexistent/x.tgz")).await;

        assert!(matches!(result, Err(CoordinatorError::Distribute(_))));
        assert_eq!(h.coordinator.state(), RunState::DistributeFailed);
        assert!(h.executor.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_policy_is_forwarded() {
        let h = harness(&["a", "b"]);
        let mut coordinator = h.coordinator.with_policy(FailurePolicy::ContinueOnError);
        h.executor.fail_command("a", "mkdir").await;

        let err = coordinator.run().await.unwrap_err();
        let report = err.report().unwrap();
        assert!(report.host("b").unwrap().is_deployed());
        assert_eq!(coordinator.policy(), FailurePolicy::ContinueOnError);
    }
}

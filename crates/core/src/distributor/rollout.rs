//! Sequential rollout of a release across hosts.

use std::path::Path;
use std::time::Instant;
use tracing::{error, info, warn};

use super::error::DistributeError;
use super::layout::RemoteLayout;
use super::plan::ReleasePlan;
use super::types::{
    DeployStep, DistributionReport, FailurePolicy, HostFailure, HostOutcome, HostStatus,
};
use crate::packager::parse_archive_timestamp;
use crate::remote::RemoteExecutor;

/// Installs archives on a fixed list of hosts.
pub struct Distributor<E: RemoteExecutor> {
    executor: E,
    hosts: Vec<String>,
    layout: RemoteLayout,
    content_dir: String,
}

impl<E: RemoteExecutor> Distributor<E> {
    /// Creates a distributor.
    ///
    /// `content_dir` is the top-level folder the archive stores its files
    /// under; it is flattened away after extraction.
    pub fn new(
        executor: E,
        hosts: Vec<String>,
        layout: RemoteLayout,
        content_dir: impl Into<String>,
    ) -> Self {
        Self {
            executor,
            hosts,
            layout,
            content_dir: content_dir.into(),
        }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    pub fn layout(&self) -> &RemoteLayout {
        &self.layout
    }

    /// Rolls `archive` out to every host.
    ///
    /// Fails without contacting any host when the archive is missing or has
    /// an unusable name. Otherwise always returns a report; check
    /// [`DistributionReport::is_success`].
    pub async fn distribute(
        &self,
        archive: &Path,
        policy: FailurePolicy,
    ) -> Result<DistributionReport, DistributeError> {
        if !archive.is_file() {
            return Err(DistributeError::ArchiveNotFound {
                path: archive.to_path_buf(),
            });
        }
        if self.hosts.is_empty() {
            return Err(DistributeError::NoHosts);
        }

        let plan = ReleasePlan::new(archive, &self.layout, &self.content_dir)?;

        match parse_archive_timestamp(&plan.file_name) {
            Some(packed_at) => info!(
                "Distributing release {} (packed {}) to {} host(s) via {}",
                plan.release,
                packed_at,
                self.hosts.len(),
                self.executor.name()
            ),
            None => info!(
                "Distributing release {} to {} host(s) via {}",
                plan.release,
                self.hosts.len(),
                self.executor.name()
            ),
        }

        let mut outcomes = Vec::with_capacity(self.hosts.len());
        let mut halted = false;

        for host in &self.hosts {
            if halted {
                warn!("[{}] skipped after earlier failure", host);
                outcomes.push(HostOutcome {
                    host: host.clone(),
                    status: HostStatus::Skipped,
                    duration_ms: 0,
                });
                continue;
            }

            let start = Instant::now();
            let status = match self.deploy_host(host, archive, &plan).await {
                Ok(()) => {
                    info!("[{}] release {} is now current", host, plan.release);
                    HostStatus::Deployed
                }
                Err(failure) => {
                    error!(
                        "[{}] rollout failed at {}: {}",
                        host, failure.step, failure.message
                    );
                    if policy == FailurePolicy::StopOnError {
                        halted = true;
                    }
                    HostStatus::Failed(failure)
                }
            };

            outcomes.push(HostOutcome {
                host: host.clone(),
                status,
                duration_ms: start.elapsed().as_millis() as u64,
            });
        }

        Ok(DistributionReport {
            release: plan.release,
            hosts: outcomes,
        })
    }

    /// Runs every step on one host, stopping at the first failure.
    async fn deploy_host(
        &self,
        host: &str,
        archive: &Path,
        plan: &ReleasePlan,
    ) -> Result<(), HostFailure> {
        self.executor
            .upload(host, archive, &plan.staged_archive)
            .await
            .map_err(|e| HostFailure::from_remote(DeployStep::Upload, &e))?;

        for remote in plan.commands() {
            self.executor
                .run(host, &remote.command)
                .await
                .map_err(|e| HostFailure::from_remote(remote.step, &e))?;
        }

        Ok(())
    }
}

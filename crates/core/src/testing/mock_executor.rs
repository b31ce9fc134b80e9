//! Mock remote executor for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::process::CommandOutput;
use crate::remote::{RemoteError, RemoteExecutor};

/// A recorded executor call for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Upload {
        host: String,
        local: PathBuf,
        remote: PathBuf,
    },
    Run {
        host: String,
        command: String,
    },
}

impl MockCall {
    pub fn host(&self) -> &str {
        match self {
            Self::Upload { host, .. } | Self::Run { host, .. } => host,
        }
    }
}

/// Mock implementation of the RemoteExecutor trait.
///
/// Records every call (failing ones included) and succeeds unless told
/// otherwise:
/// - `fail_upload` makes the next upload to a host fail with a given error
/// - `fail_command` makes every command on a host containing a pattern fail
///   with exit status 1
#[derive(Debug, Clone, Default)]
pub struct MockRemoteExecutor {
    calls: Arc<RwLock<Vec<MockCall>>>,
    upload_errors: Arc<RwLock<HashMap<String, RemoteError>>>,
    command_failures: Arc<RwLock<Vec<(String, String)>>>,
}

impl MockRemoteExecutor {
    /// Create a new mock executor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls, in order.
    pub async fn calls(&self) -> Vec<MockCall> {
        self.calls.read().await.clone()
    }

    /// Get the recorded calls for one host.
    pub async fn calls_for(&self, host: &str) -> Vec<MockCall> {
        self.calls
            .read()
            .await
            .iter()
            .filter(|c| c.host() == host)
            .cloned()
            .collect()
    }

    /// Get the commands run on one host.
    pub async fn commands_for(&self, host: &str) -> Vec<String> {
        self.calls_for(host)
            .await
            .into_iter()
            .filter_map(|c| match c {
                MockCall::Run { command, .. } => Some(command),
                MockCall::Upload { .. } => None,
            })
            .collect()
    }

    /// Get the number of uploads across all hosts.
    pub async fn upload_count(&self) -> usize {
        self.calls
            .read()
            .await
            .iter()
            .filter(|c| matches!(c, MockCall::Upload { .. }))
            .count()
    }

    /// Clear recorded calls.
    pub async fn clear_calls(&self) {
        self.calls.write().await.clear();
    }

    /// Configure the next upload to `host` to fail with `error`.
    pub async fn fail_upload(&self, host: &str, error: RemoteError) {
        self.upload_errors
            .write()
            .await
            .insert(host.to_string(), error);
    }

    /// Make commands on `host` containing `pattern` fail.
    pub async fn fail_command(&self, host: &str, pattern: &str) {
        self.command_failures
            .write()
            .await
            .push((host.to_string(), pattern.to_string()));
    }
}

#[async_trait]
impl RemoteExecutor for MockRemoteExecutor {
    fn name(&self) -> &str {
        "mock"
    }

    async fn upload(
        &self,
        host: &str,
        local: &Path,
        remote_path: &Path,
    ) -> Result<(), RemoteError> {
        self.calls.write().await.push(MockCall::Upload {
            host: host.to_string(),
            local: local.to_path_buf(),
            remote: remote_path.to_path_buf(),
        });

        match self.upload_errors.write().await.remove(host) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn run(&self, host: &str, command: &str) -> Result<CommandOutput, RemoteError> {
        self.calls.write().await.push(MockCall::Run {
            host: host.to_string(),
            command: command.to_string(),
        });

        let fails = self
            .command_failures
            .read()
            .await
            .iter()
            .any(|(h, pattern)| h == host && command.contains(pattern.as_str()));

        if fails {
            Err(RemoteError::CommandFailed {
                host: host.to_string(),
                command: command.to_string(),
                exit_code: Some(1),
                stderr: "mock failure".to_string(),
            })
        } else {
            Ok(CommandOutput::success(""))
        }
    }
}

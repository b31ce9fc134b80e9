//! Trait definitions for the remote module.

use async_trait::async_trait;
use std::path::Path;

use super::error::RemoteError;
use crate::process::CommandOutput;

/// Runs commands and places files on remote hosts.
#[async_trait]
pub trait RemoteExecutor: Send + Sync {
    /// Returns the name of this executor implementation.
    fn name(&self) -> &str;

    /// Copies a local file to `remote_path` on `host`.
    async fn upload(&self, host: &str, local: &Path, remote_path: &Path)
        -> Result<(), RemoteError>;

    /// Runs a shell command on `host`.
    ///
    /// A non-zero exit status is returned as `RemoteError::CommandFailed`.
    async fn run(&self, host: &str, command: &str) -> Result<CommandOutput, RemoteError>;
}

#[async_trait]
impl<T: RemoteExecutor + ?Sized> RemoteExecutor for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn upload(
        &self,
        host: &str,
        local: &Path,
        remote_path: &Path,
    ) -> Result<(), RemoteError> {
        (**self).upload(host, local, remote_path).await
    }

    async fn run(&self, host: &str, command: &str) -> Result<CommandOutput, RemoteError> {
        (**self).run(host, command).await
    }
}

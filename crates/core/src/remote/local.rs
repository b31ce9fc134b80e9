//! Executor that targets the local machine.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::error::RemoteError;
use super::traits::RemoteExecutor;
use crate::process::{run_command, CommandOutput};

/// Runs every "remote" operation on this machine.
///
/// The host name is only used in logs and errors. Useful when the web server
/// is the machine doing the release, and for exercising the whole rollout
/// against a scratch directory.
pub struct LocalExecutor {
    shell: PathBuf,
    timeout_secs: u64,
}

impl LocalExecutor {
    /// Creates a local executor with the given command timeout.
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            shell: PathBuf::from("sh"),
            timeout_secs,
        }
    }
}

impl Default for LocalExecutor {
    fn default() -> Self {
        Self::new(300)
    }
}

async fn same_file(a: &Path, b: &Path) -> bool {
    match (tokio::fs::canonicalize(a).await, tokio::fs::canonicalize(b).await) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[async_trait]
impl RemoteExecutor for LocalExecutor {
    fn name(&self) -> &str {
        "local"
    }

    async fn upload(
        &self,
        host: &str,
        local: &Path,
        remote_path: &Path,
    ) -> Result<(), RemoteError> {
        debug!("[{}] copy {} -> {}", host, local.display(), remote_path.display());
        // Copying a file onto itself truncates it before it is read
        if same_file(local, remote_path).await {
            return Err(RemoteError::Transport {
                host: host.to_string(),
                reason: format!(
                    "{} is already the staged archive; stage outside the output directory",
                    local.display()
                ),
            });
        }

        tokio::fs::copy(local, remote_path)
            .await
            .map_err(|e| RemoteError::Transport {
                host: host.to_string(),
                reason: format!("copy to {} failed: {}", remote_path.display(), e),
            })?;
        Ok(())
    }

    async fn run(&self, host: &str, command: &str) -> Result<CommandOutput, RemoteError> {
        debug!("[{}] run: {}", host, command);
        let output = run_command(&self.shell, &["-c", command], None, self.timeout_secs)
            .await
            .map_err(|e| RemoteError::Process {
                host: host.to_string(),
                source: e,
            })?;

        if output.is_success() {
            Ok(output)
        } else {
            Err(RemoteError::CommandFailed {
                host: host.to_string(),
                command: command.to_string(),
                exit_code: output.exit_code,
                stderr: output.stderr,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_upload_copies_file() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("a.tgz");
        let dst = dir.path().join("b.tgz");
        fs::write(&src, b"archive").unwrap();

        let executor = LocalExecutor::default();
        executor.upload("localhost", &src, &dst).await.unwrap();

        assert_eq!(fs::read(&dst).unwrap(), b"archive");
        assert!(src.exists());
    }

    #[tokio::test]
    async fn test_upload_missing_destination_dir() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("a.tgz");
        fs::write(&src, b"archive").unwrap();

        let executor = LocalExecutor::default();
        let err = executor
            .upload("localhost", &src, &dir.path().join("missing/b.tgz"))
            .await
            .unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_upload_onto_itself_keeps_file() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("a.tgz");
        fs::write(&src, b"archive").unwrap();

        let executor = LocalExecutor::default();
        let err = executor
            .upload("localhost", &src, &dir.path().join("./a.tgz"))
            .await
            .unwrap_err();

        assert!(err.is_transport());
        assert_eq!(fs::read(&src).unwrap(), b"archive");
    }

    #[tokio::test]
    async fn test_run_success_and_failure() {
        let executor = LocalExecutor::default();

        let output = executor.run("localhost", "echo deployed").await.unwrap();
        assert_eq!(output.stdout.trim(), "deployed");

        let err = executor.run("localhost", "exit 7").await.unwrap_err();
        assert!(matches!(
            err,
            RemoteError::CommandFailed {
                exit_code: Some(7),
                ..
            }
        ));
    }
}

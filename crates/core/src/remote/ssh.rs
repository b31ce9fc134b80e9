//! ssh/scp based executor.

use async_trait::async_trait;
use std::path::Path;
use tracing::{debug, warn};

use super::config::RemoteConfig;
use super::error::{RemoteError, SSH_TRANSPORT_EXIT_CODE};
use super::traits::RemoteExecutor;
use crate::process::{run_command, CommandOutput};

/// Executor that shells out to the OpenSSH client tools.
pub struct SshExecutor {
    config: RemoteConfig,
}

impl SshExecutor {
    /// Creates a new executor with the given configuration.
    pub fn new(config: RemoteConfig) -> Self {
        Self { config }
    }

    /// Options common to ssh and scp.
    fn common_args(&self) -> Vec<String> {
        let mut args = vec![
            "-o".to_string(),
            "BatchMode=yes".to_string(),
            "-o".to_string(),
            format!("ConnectTimeout={}", self.config.connect_timeout_secs),
        ];

        for option in &self.config.ssh_options {
            args.extend(["-o".to_string(), option.clone()]);
        }

        if let Some(ref identity) = self.config.identity_file {
            args.extend(["-i".to_string(), identity.to_string_lossy().to_string()]);
        }

        args
    }

    /// Builds ssh arguments for running `command` on `host`.
    fn build_ssh_args(&self, host: &str, command: &str) -> Vec<String> {
        let mut args = self.common_args();
        if let Some(port) = self.config.port {
            args.extend(["-p".to_string(), port.to_string()]);
        }
        args.push(self.config.destination(host));
        args.push("--".to_string());
        args.push(command.to_string());
        args
    }

    /// Builds scp arguments for copying `local` to `remote_path` on `host`.
    fn build_scp_args(&self, host: &str, local: &Path, remote_path: &Path) -> Vec<String> {
        let mut args = self.common_args();
        // scp spells the port flag with a capital P
        if let Some(port) = self.config.port {
            args.extend(["-P".to_string(), port.to_string()]);
        }
        args.push(local.to_string_lossy().to_string());
        args.push(format!(
            "{}:{}",
            self.config.destination(host),
            remote_path.display()
        ));
        args
    }

    /// Maps a finished ssh/scp process to the executor result.
    fn check_output(
        host: &str,
        command: &str,
        output: CommandOutput,
    ) -> Result<CommandOutput, RemoteError> {
        match output.exit_code {
            Some(0) => Ok(output),
            Some(SSH_TRANSPORT_EXIT_CODE) | None => Err(RemoteError::Transport {
                host: host.to_string(),
                reason: if output.stderr_summary().is_empty() {
                    format!("exit status {:?}", output.exit_code)
                } else {
                    output.stderr_summary()
                },
            }),
            Some(_) => Err(RemoteError::CommandFailed {
                host: host.to_string(),
                command: command.to_string(),
                exit_code: output.exit_code,
                stderr: output.stderr,
            }),
        }
    }
}

#[async_trait]
impl RemoteExecutor for SshExecutor {
    fn name(&self) -> &str {
        "ssh"
    }

    async fn upload(
        &self,
        host: &str,
        local: &Path,
        remote_path: &Path,
    ) -> Result<(), RemoteError> {
        debug!("[{}] put {} -> {}", host, local.display(), remote_path.display());
        let args = self.build_scp_args(host, local, remote_path);
        let output = run_command(
            &self.config.scp_path,
            &args,
            None,
            self.config.command_timeout_secs,
        )
        .await
        .map_err(|e| RemoteError::Process {
            host: host.to_string(),
            source: e,
        })?;

        // scp reports every failure as exit 1, so treat all of them as transport
        if !output.is_success() {
            warn!("[{}] upload failed: {}", host, output.stderr_summary());
            return Err(RemoteError::Transport {
                host: host.to_string(),
                reason: format!("scp failed: {}", output.stderr_summary()),
            });
        }

        Ok(())
    }

    async fn run(&self, host: &str, command: &str) -> Result<CommandOutput, RemoteError> {
        debug!("[{}] run: {}", host, command);
        let args = self.build_ssh_args(host, command);
        let output = run_command(
            &self.config.ssh_path,
            &args,
            None,
            self.config.command_timeout_secs,
        )
        .await
        .map_err(|e| RemoteError::Process {
            host: host.to_string(),
            source: e,
        })?;

        Self::check_output(host, command, output)
    }
}

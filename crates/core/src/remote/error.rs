//! Error types for the remote module.

use thiserror::Error;

use crate::process::ProcessError;

/// Exit status ssh and scp use for their own (connection level) failures.
pub const SSH_TRANSPORT_EXIT_CODE: i32 = 255;

/// Errors that can occur while talking to a host.
///
/// Transport failures mean the command never got a verdict from the host;
/// command failures mean it ran and returned a non-zero status.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The connection or the local transport process failed.
    #[error("Transport failure for {host}: {reason}")]
    Transport { host: String, reason: String },

    /// The transport process could not be run at all.
    #[error("Failed to run transport for {host}")]
    Process {
        host: String,
        #[source]
        source: ProcessError,
    },

    /// The remote command ran and exited with a non-zero status.
    #[error("Command on {host} exited with {exit_code:?}: {stderr}")]
    CommandFailed {
        host: String,
        command: String,
        exit_code: Option<i32>,
        stderr: String,
    },
}

impl RemoteError {
    /// Whether the failure happened before the host could run anything.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Process { .. })
    }
}

//! External process execution shared by the packager and the executors.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use serde::Serialize;
use thiserror::Error;
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::debug;

/// Errors raised while running an external program.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The program binary could not be found.
    #[error("Program not found: {program}")]
    NotFound { program: PathBuf },

    /// The program could not be started.
    #[error("Failed to spawn {program}")]
    SpawnFailed {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The program did not finish in time.
    #[error("{program} timed out after {timeout_secs} seconds")]
    Timeout { program: PathBuf, timeout_secs: u64 },
}

/// Captured result of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Creates a successful output with the given stdout.
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Creates a failed output with the given exit code and stderr.
    pub fn failure(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            exit_code: Some(exit_code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Whether the process exited with status 0.
    pub fn is_success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Last non-empty line of stderr, useful for short error messages.
    pub fn stderr_summary(&self) -> String {
        self.stderr
            .lines()
            .rev()
            .find(|l| !l.trim().is_empty())
            .unwrap_or("")
            .trim()
            .to_string()
    }
}

/// Runs `program` with `args` and waits for it to finish.
///
/// Stdin is closed, stdout and stderr are captured. The child is killed when
/// `timeout_secs` elapses.
pub async fn run_command<S: AsRef<str>>(
    program: &Path,
    args: &[S],
    work_dir: Option<&Path>,
    timeout_secs: u64,
) -> Result<CommandOutput, ProcessError> {
    let args: Vec<&str> = args.iter().map(|a| a.as_ref()).collect();
    debug!("Running {} {}", program.display(), args.join(" "));

    let mut command = Command::new(program);
    command
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    if let Some(dir) = work_dir {
        command.current_dir(dir);
    }

    let child = command.spawn().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ProcessError::NotFound {
                program: program.to_path_buf(),
            }
        } else {
            ProcessError::SpawnFailed {
                program: program.to_path_buf(),
                source: e,
            }
        }
    })?;

    let output = match timeout(Duration::from_secs(timeout_secs), child.wait_with_output()).await
    {
        Ok(result) => result.map_err(|e| ProcessError::SpawnFailed {
            program: program.to_path_buf(),
            source: e,
        })?,
        // Dropping the future kills the child (kill_on_drop)
        Err(_) => {
            return Err(ProcessError::Timeout {
                program: program.to_path_buf(),
                timeout_secs,
            })
        }
    };

    Ok(CommandOutput {
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

/// Quotes a string for use as a single POSIX shell word.
pub fn shell_quote(value: &str) -> String {
    if !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '.' | '_' | '-' | ':' | '@' | '+' | '='))
    {
        return value.to_string();
    }
    format!("'{}'", value.replace('\'', r"'\''"))
}

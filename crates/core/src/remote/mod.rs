//! Remote execution module.
//!
//! This module provides the `RemoteExecutor` trait used by the distributor to
//! copy archives to hosts and run shell commands on them.
//!
//! # Implementations
//!
//! - `SshExecutor`: `scp` uploads and `ssh` commands as a fixed user
//! - `LocalExecutor`: the "host" is this machine; uploads are file copies
//!   and commands run through `sh -c`
//!
//! # Example
//!
//! ```ignore
//! use webstatic_core::remote::{RemoteConfig, RemoteExecutor, SshExecutor};
//!
//! let executor = SshExecutor::new(RemoteConfig::default());
//! executor.upload("18.204.9.11", archive, Path::new("/tmp/web_static_1.tgz")).await?;
//! let output = executor.run("18.204.9.11", "ls /data/web_static/releases").await?;
//! println!("{}", output.stdout);
//! ```

mod config;
mod error;
mod local;
mod ssh;
mod traits;

pub use config::{RemoteConfig, Transport};
pub use error::RemoteError;
pub use local::LocalExecutor;
pub use ssh::SshExecutor;
pub use traits::RemoteExecutor;

/// Create the executor selected by `config.transport`.
pub fn create_executor(config: &RemoteConfig) -> Box<dyn RemoteExecutor> {
    match config.transport {
        Transport::Ssh => Box::new(SshExecutor::new(config.clone())),
        Transport::Local => Box::new(LocalExecutor::new(config.command_timeout_secs)),
    }
}

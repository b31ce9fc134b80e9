//! Configuration for the remote module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How commands reach the hosts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transport {
    /// `ssh` and `scp` against each host.
    #[default]
    Ssh,
    /// The current machine, whatever the host name says.
    Local,
}

/// Connection settings shared by every host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Transport used to reach the hosts.
    #[serde(default)]
    pub transport: Transport,

    /// Login user on every host.
    #[serde(default = "default_user")]
    pub user: String,

    /// Host addresses, deployed to in order.
    #[serde(default = "default_hosts")]
    pub hosts: Vec<String>,

    /// Private key passed to ssh/scp with `-i`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_file: Option<PathBuf>,

    /// SSH port, when not the default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Path to the ssh binary.
    #[serde(default = "default_ssh_path")]
    pub ssh_path: PathBuf,

    /// Path to the scp binary.
    #[serde(default = "default_scp_path")]
    pub scp_path: PathBuf,

    /// Extra `-o` options, e.g. `StrictHostKeyChecking=accept-new`.
    #[serde(default)]
    pub ssh_options: Vec<String>,

    /// ssh `ConnectTimeout` in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Timeout for a single upload or command in seconds.
    #[serde(default = "default_command_timeout")]
    pub command_timeout_secs: u64,
}

fn default_user() -> String {
    "ubuntu".to_string()
}

fn default_hosts() -> Vec<String> {
    vec!["18.204.9.11".to_string(), "18.233.66.83".to_string()]
}

fn default_ssh_path() -> PathBuf {
    PathBuf::from("ssh")
}

fn default_scp_path() -> PathBuf {
    PathBuf::from("scp")
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_command_timeout() -> u64 {
    300
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            transport: Transport::default(),
            user: default_user(),
            hosts: default_hosts(),
            identity_file: None,
            port: None,
            ssh_path: default_ssh_path(),
            scp_path: default_scp_path(),
            ssh_options: Vec::new(),
            connect_timeout_secs: default_connect_timeout(),
            command_timeout_secs: default_command_timeout(),
        }
    }
}

impl RemoteConfig {
    /// Creates a config for the given user and hosts.
    pub fn with_hosts(user: impl Into<String>, hosts: Vec<String>) -> Self {
        Self {
            user: user.into(),
            hosts,
            ..Default::default()
        }
    }

    /// Sets the identity file.
    pub fn with_identity_file(mut self, path: PathBuf) -> Self {
        self.identity_file = Some(path);
        self
    }

    /// Sets the SSH port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the transport.
    pub fn with_transport(mut self, transport: Transport) -> Self {
        self.transport = transport;
        self
    }

    /// `user@host` destination for ssh/scp.
    pub fn destination(&self, host: &str) -> String {
        if self.user.is_empty() {
            host.to_string()
        } else {
            format!("{}@{}", self.user, host)
        }
    }
}

use std::path::Path;

use super::{types::Config, ConfigError};
use crate::remote::Transport;

/// Validate configuration
/// Currently validates:
/// - At least one host, none blank
/// - A login user for the ssh transport
/// - The source directory has a name to prefix archives with
/// - Timeouts are not 0
/// - Remote layout paths are absolute
/// - The local transport does not stage into the archive output directory
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let invalid = |msg: &str| Err(ConfigError::ValidationError(msg.to_string()));

    // Remote validation
    if config.remote.hosts.is_empty() {
        return invalid("remote.hosts cannot be empty");
    }
    if config.remote.hosts.iter().any(|h| h.trim().is_empty()) {
        return invalid("remote.hosts cannot contain blank entries");
    }
    if config.remote.transport == Transport::Ssh && config.remote.user.trim().is_empty() {
        return invalid("remote.user is required for the ssh transport");
    }
    if config.remote.command_timeout_secs == 0 || config.remote.connect_timeout_secs == 0 {
        return invalid("remote timeouts cannot be 0");
    }

    // Package validation
    if config.package.content_dir_name().is_none() {
        return invalid("package.source_dir must name a directory");
    }
    if config.package.timeout_secs == 0 {
        return invalid("package.timeout_secs cannot be 0");
    }

    // Layout validation
    if !config.layout.root.is_absolute() {
        return invalid("layout.root must be an absolute path");
    }
    if !config.layout.staging_dir.is_absolute() {
        return invalid("layout.staging_dir must be an absolute path");
    }
    if config.remote.transport == Transport::Local
        && same_dir(&config.package.output_dir, &config.layout.staging_dir)
    {
        return invalid(
            "layout.staging_dir must differ from package.output_dir for the local transport",
        );
    }

    Ok(())
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn assert_invalid(config: &Config) {
        let result = validate_config(config);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_empty_hosts_fails() {
        let mut config = Config::default();
        config.remote.hosts.clear();
        assert_invalid(&config);
    }

    #[test]
    fn test_validate_blank_host_fails() {
        let mut config = Config::default();
        config.remote.hosts.push("  ".to_string());
        assert_invalid(&config);
    }

    #[test]
    fn test_validate_user_required_for_ssh_only() {
        let mut config = Config::default();
        config.remote.user = String::new();
        assert_invalid(&config);

        config.remote.transport = Transport::Local;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_zero_timeout_fails() {
        let mut config = Config::default();
        config.remote.command_timeout_secs = 0;
        assert_invalid(&config);

        let mut config = Config::default();
        config.package.timeout_secs = 0;
        assert_invalid(&config);
    }

    #[test]
    fn test_validate_source_dir_without_name_fails() {
        let mut config = Config::default();
        config.package.source_dir = PathBuf::from("/");
        assert_invalid(&config);
    }

    #[test]
    fn test_validate_relative_layout_fails() {
        let mut config = Config::default();
        config.layout.root = PathBuf::from("data/web_static");
        assert_invalid(&config);

        let mut config = Config::default();
        config.layout.staging_dir = PathBuf::from("tmp");
        assert_invalid(&config);
    }

    #[test]
    fn test_validate_local_staging_in_output_dir_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut config = Config::default();
        config.remote.transport = Transport::Local;
        config.package.output_dir = dir.path().to_path_buf();
        config.layout.staging_dir = dir.path().join(".");
        assert_invalid(&config);

        // Only the local transport shares a filesystem with the output dir
        config.remote.transport = Transport::Ssh;
        assert!(validate_config(&config).is_ok());

        config.remote.transport = Transport::Local;
        config.layout.staging_dir = dir.path().join("stage");
        assert!(validate_config(&config).is_ok());
    }
}

//! Configuration for the packager module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the tar-based packager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageConfig {
    /// Directory holding the static content.
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,

    /// Directory the archives are written to. Created when missing.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Path to the tar binary.
    #[serde(default = "default_tar_path")]
    pub tar_path: PathBuf,

    /// Timeout for the archive command in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_source_dir() -> PathBuf {
    PathBuf::from("web_static")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("versions")
}

fn default_tar_path() -> PathBuf {
    PathBuf::from("tar")
}

fn default_timeout() -> u64 {
    300
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            output_dir: default_output_dir(),
            tar_path: default_tar_path(),
            timeout_secs: default_timeout(),
        }
    }
}

impl PackageConfig {
    /// Creates a config for the given source and output directories.
    pub fn with_dirs(source_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }

    /// Sets the tar binary.
    pub fn with_tar_path(mut self, tar_path: PathBuf) -> Self {
        self.tar_path = tar_path;
        self
    }

    /// Sets the timeout in seconds.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Final component of the source directory.
    ///
    /// Archives are prefixed with it, and the archive contents are rooted
    /// under a directory of this name.
    pub fn content_dir_name(&self) -> Option<String> {
        self.source_dir
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PackageConfig::default();
        assert_eq!(config.source_dir, PathBuf::from("web_static"));
        assert_eq!(config.output_dir, PathBuf::from("versions"));
        assert_eq!(config.tar_path, PathBuf::from("tar"));
        assert_eq!(config.timeout_secs, 300);
    }

    #[test]
    fn test_config_builder() {
        let config = PackageConfig::with_dirs("/srv/site/public", "/srv/out")
            .with_tar_path(PathBuf::from("/usr/bin/bsdtar"))
            .with_timeout(30);

        assert_eq!(config.source_dir, PathBuf::from("/srv/site/public"));
        assert_eq!(config.output_dir, PathBuf::from("/srv/out"));
        assert_eq!(config.tar_path, PathBuf::from("/usr/bin/bsdtar"));
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_content_dir_name() {
        assert_eq!(
            PackageConfig::default().content_dir_name().as_deref(),
            Some("web_static")
        );
        assert_eq!(
            PackageConfig::with_dirs("/srv/site/public/", "out")
                .content_dir_name()
                .as_deref(),
            Some("public")
        );
        assert_eq!(PackageConfig::with_dirs("/", "out").content_dir_name(), None);
    }
}

//! Directory layout on the web servers.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where releases live on each host.
///
/// ```text
/// <root>/
/// ├── current -> <root>/releases/web_static_20240307104334/
/// └── releases/
///     ├── web_static_20240301090000/
///     └── web_static_20240307104334/
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteLayout {
    /// Directory holding `releases/` and the `current` link.
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Directory archives are uploaded to before extraction.
    #[serde(default = "default_staging_dir")]
    pub staging_dir: PathBuf,
}

fn default_root() -> PathBuf {
    PathBuf::from("/data/web_static")
}

fn default_staging_dir() -> PathBuf {
    PathBuf::from("/tmp")
}

impl Default for RemoteLayout {
    fn default() -> Self {
        Self {
            root: default_root(),
            staging_dir: default_staging_dir(),
        }
    }
}

impl RemoteLayout {
    /// Creates a layout rooted at `root` with uploads staged in `staging_dir`.
    pub fn new(root: impl Into<PathBuf>, staging_dir: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            staging_dir: staging_dir.into(),
        }
    }

    pub fn releases_dir(&self) -> PathBuf {
        self.root.join("releases")
    }

    pub fn release_dir(&self, release: &str) -> PathBuf {
        self.releases_dir().join(release)
    }

    pub fn current_link(&self) -> PathBuf {
        self.root.join("current")
    }

    pub fn staged_archive(&self, file_name: &str) -> PathBuf {
        self.staging_dir.join(file_name)
    }
}

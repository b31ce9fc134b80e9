//! Tar-based packager implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::{error, info};

use super::config::PackageConfig;
use super::error::PackError;
use super::naming::archive_file_name;
use super::traits::Packager;
use crate::process::run_command;

/// Packs the content directory with `tar -czvf`.
pub struct TarPackager {
    config: PackageConfig,
}

impl TarPackager {
    /// Creates a new tar packager with the given configuration.
    pub fn new(config: PackageConfig) -> Self {
        Self { config }
    }

    /// Creates a packager with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(PackageConfig::default())
    }

    /// Returns the packager configuration.
    pub fn config(&self) -> &PackageConfig {
        &self.config
    }

    /// Builds tar arguments that store the content under its own directory
    /// name, e.g. `web_static/index.html`.
    fn build_args(&self, archive_path: &Path, content_dir: &str) -> Vec<String> {
        let parent = self
            .config
            .source_dir
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        vec![
            "-czvf".to_string(),
            archive_path.to_string_lossy().to_string(),
            "-C".to_string(),
            parent.to_string_lossy().to_string(),
            content_dir.to_string(),
        ]
    }

    /// Packs the content directory using `timestamp` for the archive name.
    pub async fn pack_at(&self, timestamp: DateTime<Utc>) -> Result<PathBuf, PackError> {
        let content_dir = self
            .config
            .content_dir_name()
            .ok_or_else(|| PackError::InvalidSourceDir {
                path: self.config.source_dir.clone(),
            })?;

        if !self.config.source_dir.is_dir() {
            return Err(PackError::SourceNotFound {
                path: self.config.source_dir.clone(),
            });
        }

        tokio::fs::create_dir_all(&self.config.output_dir)
            .await
            .map_err(|e| PackError::OutputDirectoryFailed {
                path: self.config.output_dir.clone(),
                source: e,
            })?;

        let archive_path = self
            .config
            .output_dir
            .join(archive_file_name(&content_dir, timestamp));

        info!(
            "Packing {} into {}",
            self.config.source_dir.display(),
            archive_path.display()
        );

        let args = self.build_args(&archive_path, &content_dir);
        let output = run_command(&self.config.tar_path, &args, None, self.config.timeout_secs)
            .await?;

        if !output.is_success() {
            error!(
                "tar exited with {:?}: {}",
                output.exit_code,
                output.stderr_summary()
            );
            return Err(PackError::CommandFailed {
                exit_code: output.exit_code,
                stderr: output.stderr,
            });
        }

        let size = tokio::fs::metadata(&archive_path)
            .await
            .map(|m| m.len())
            .unwrap_or(0);
        info!("Packed {} ({} bytes)", archive_path.display(), size);

        Ok(archive_path)
    }
}

#[async_trait]
impl Packager for TarPackager {
    fn name(&self) -> &str {
        "tar"
    }

    async fn pack(&self) -> Result<PathBuf, PackError> {
        self.pack_at(Utc::now()).await
    }

    async fn validate(&self) -> Result<(), PackError> {
        if self.config.content_dir_name().is_none() {
            return Err(PackError::InvalidSourceDir {
                path: self.config.source_dir.clone(),
            });
        }

        let output = run_command(&self.config.tar_path, &["--version"], None, 10).await?;
        if !output.is_success() {
            return Err(PackError::CommandFailed {
                exit_code: output.exit_code,
                stderr: output.stderr,
            });
        }

        Ok(())
    }
}

//! Mock packager for testing.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::packager::{PackError, Packager};

/// Mock implementation of the Packager trait.
///
/// Every successful `pack` writes a small placeholder file at the configured
/// archive path (so the distributor's existence check passes) and returns
/// that path.
#[derive(Debug, Clone)]
pub struct MockPackager {
    archive_path: PathBuf,
    /// Number of `pack` calls, failed ones included.
    pack_count: Arc<RwLock<usize>>,
    /// If set, the next `pack` will fail with this error.
    next_error: Arc<RwLock<Option<PackError>>>,
}

impl MockPackager {
    /// Create a mock that "packs" to `archive_path`.
    pub fn new(archive_path: impl Into<PathBuf>) -> Self {
        Self {
            archive_path: archive_path.into(),
            pack_count: Arc::new(RwLock::new(0)),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Get the number of `pack` calls.
    pub async fn pack_count(&self) -> usize {
        *self.pack_count.read().await
    }

    /// Configure the next `pack` to fail with the given error.
    pub async fn set_next_error(&self, error: PackError) {
        *self.next_error.write().await = Some(error);
    }
}

#[async_trait]
impl Packager for MockPackager {
    fn name(&self) -> &str {
        "mock"
    }

    async fn pack(&self) -> Result<PathBuf, PackError> {
        *self.pack_count.write().await += 1;

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        if let Some(parent) = self.archive_path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                PackError::OutputDirectoryFailed {
                    path: parent.to_path_buf(),
                    source: e,
                }
            })?;
        }
        tokio::fs::write(&self.archive_path, b"mock archive")
            .await
            .map_err(|e| PackError::OutputDirectoryFailed {
                path: self.archive_path.clone(),
                source: e,
            })?;

        Ok(self.archive_path.clone())
    }

    async fn validate(&self) -> Result<(), PackError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_mock_pack_writes_file() {
        let dir = TempDir::new().unwrap();
        let packager = MockPackager::new(dir.path().join("versions/web_static_1.tgz"));

        let path = packager.pack().await.unwrap();

        assert!(path.is_file());
        assert_eq!(packager.pack_count().await, 1);
    }

    #[tokio::test]
    async fn test_mock_pack_error_is_one_shot() {
        let dir = TempDir::new().unwrap();
        let packager = MockPackager::new(dir.path().join("web_static_1.tgz"));
        packager
            .set_next_error(PackError::SourceNotFound {
                path: PathBuf::from("web_static"),
            })
            .await;

        assert!(packager.pack().await.is_err());
        assert!(packager.pack().await.is_ok());
        assert_eq!(packager.pack_count().await, 2);
    }
}

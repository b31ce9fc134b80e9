//! Trait definitions for the packager module.

use async_trait::async_trait;
use std::path::PathBuf;

use super::error::PackError;

/// Something that can produce a release archive.
#[async_trait]
pub trait Packager: Send + Sync {
    /// Returns the name of this packager implementation.
    fn name(&self) -> &str;

    /// Packs the content directory and returns the archive path.
    async fn pack(&self) -> Result<PathBuf, PackError>;

    /// Validates that the packager is properly configured and ready.
    async fn validate(&self) -> Result<(), PackError>;
}

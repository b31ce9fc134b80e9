//! Packager module for building release archives.
//!
//! A packager turns the static content directory into a single compressed
//! archive named after the UTC time it was created, e.g.
//! `versions/web_static_20240307104334.tgz`.
//!
//! # Example
//!
//! ```ignore
//! use webstatic_core::packager::{PackageConfig, Packager, TarPackager};
//!
//! let packager = TarPackager::new(PackageConfig::default());
//! packager.validate().await?;
//!
//! let archive = packager.pack().await?;
//! println!("Packed {}", archive.display());
//! ```

mod config;
mod error;
mod naming;
mod tar;
mod traits;

pub use config::PackageConfig;
pub use error::PackError;
pub use naming::{archive_file_name, parse_archive_timestamp, release_name, ARCHIVE_EXTENSION};
pub use tar::TarPackager;
pub use traits::Packager;

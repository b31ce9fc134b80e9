//! Archive and release naming rules.

use chrono::{DateTime, NaiveDateTime, Utc};
use regex_lite::Regex;
use std::path::Path;

/// Extension given to every archive.
pub const ARCHIVE_EXTENSION: &str = "tgz";

const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Builds the archive file name for `prefix` packed at `timestamp`.
///
/// `archive_file_name("web_static", t)` gives `web_static_20240307104334.tgz`.
pub fn archive_file_name(prefix: &str, timestamp: DateTime<Utc>) -> String {
    format!(
        "{}_{}.{}",
        prefix,
        timestamp.format(TIMESTAMP_FORMAT),
        ARCHIVE_EXTENSION
    )
}

/// Derives the release folder name from an archive path.
///
/// The base file name is cut at its first `.`, so both `x.tgz` and
/// `x.tar.gz` give `x`. Returns `None` when nothing is left.
pub fn release_name(archive: &Path) -> Option<String> {
    let file_name = archive.file_name()?.to_str()?;
    let stem = file_name.split('.').next().unwrap_or("");
    if stem.is_empty() {
        None
    } else {
        Some(stem.to_string())
    }
}

/// Extracts the packing time from an archive file name, if it follows the
/// `<prefix>_<YYYYMMDDHHMMSS>.tgz` pattern.
pub fn parse_archive_timestamp(file_name: &str) -> Option<DateTime<Utc>> {
    let re = Regex::new(r"_(\d{14})\.tgz$").ok()?;
    let caps = re.captures(file_name)?;
    let naive = NaiveDateTime::parse_from_str(caps.get(1)?.as_str(), TIMESTAMP_FORMAT).ok()?;
    Some(naive.and_utc())
}

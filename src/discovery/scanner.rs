//! File system scanner for discovering assets.
//!
//! Recursively walks the asset root and produces one [`AssetRecord`] per
//! regular file whose extension is in the supported table.

use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{AssetsGenError, Result};
use crate::output::{plural, Logger};

use super::category::{extension_of, AssetCategory};
use super::identifier::{derive_identifier, path_segments};

/// Metadata for one discovered asset file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRecord {
    /// Path relative to the asset root, with `/` separators.
    pub relative_path: String,
    pub absolute_path: PathBuf,
    /// Lowercased extension including the leading dot.
    pub extension: String,
    pub category: AssetCategory,
    /// Identifier derived from the file name alone.
    pub identifier: String,
    /// Identifier path: sanitized directory names followed by the file identifier.
    pub path_segments: Vec<String>,
}

impl AssetRecord {
    /// Build a record for a file located at `relative` beneath `root`.
    ///
    /// Returns `None` when the extension is not supported.
    pub fn from_relative(root: &Path, relative: &Path) -> Option<Self> {
        let extension = extension_of(relative)?;
        let category = AssetCategory::from_extension(&extension)?;
        let file_name = relative.file_name()?.to_string_lossy();

        Some(Self {
            relative_path: normalize_path(relative),
            absolute_path: root.join(relative),
            extension,
            category,
            identifier: derive_identifier(&file_name),
            path_segments: path_segments(relative),
        })
    }
}

/// Join path components with forward slashes.
pub fn normalize_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Scan the asset root for supported files.
///
/// A missing root is not fatal: it yields no records and a warning so a
/// fresh project still produces an (empty) module. Any other traversal
/// failure is returned as an error.
pub fn scan_assets(root: &Path, logger: &dyn Logger) -> Result<Vec<AssetRecord>> {
    if !root.exists() {
        logger.warn(&format!("Assets directory not found: {}", root.display()));
        return Ok(Vec::new());
    }

    let mut records = Vec::new();

    // Links are not followed; they fail the `is_file` check and are skipped.
    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 && is_not_found(&err) => {
                logger.warn(&format!("Assets directory not found: {}", root.display()));
                return Ok(Vec::new());
            }
            Err(err) => {
                let path = err.path().unwrap_or(root).to_path_buf();
                return Err(AssetsGenError::io(path, "Failed to scan assets", err));
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let relative = match entry.path().strip_prefix(root) {
            Ok(relative) => relative,
            Err(_) => continue,
        };

        if let Some(record) = AssetRecord::from_relative(root, relative) {
            logger.debug(&format!(
                "Found: {} -> {}",
                record.relative_path,
                record.path_segments.join(".")
            ));
            records.push(record);
        }
    }

    logger.success(&format!("Found {}", plural(records.len(), "asset", "assets")));
    Ok(records)
}

fn is_not_found(err: &walkdir::Error) -> bool {
    err.io_error()
        .map(|e| e.kind() == io::ErrorKind::NotFound)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{Level, MemoryLogger};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_scan_empty_directory() {
        let dir = tempdir().unwrap();
        let logger = MemoryLogger::new();

        let records = scan_assets(dir.path(), &logger).unwrap();

        assert!(records.is_empty());
        assert!(logger.messages(Level::Warn).is_empty());
    }

    #[test]
    fn test_scan_filters_unsupported() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("logo.png"), b"png").unwrap();
        fs::write(dir.path().join("icon.SVG"), b"<svg/>").unwrap();
        fs::write(dir.path().join("readme.md"), b"# Readme").unwrap();
        fs::write(dir.path().join("Makefile"), b"all:").unwrap();

        let logger = MemoryLogger::new();
        let mut records = scan_assets(dir.path(), &logger).unwrap();
        records.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].relative_path, "icon.SVG");
        assert_eq!(records[0].extension, ".svg");
        assert_eq!(records[0].category, AssetCategory::Svg);
        assert_eq!(records[1].category, AssetCategory::Images);
    }

    #[test]
    fn test_scan_recursive() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("icons/social")).unwrap();
        fs::create_dir_all(dir.path().join("fonts")).unwrap();
        fs::write(dir.path().join("icons/social/git-hub.svg"), b"<svg/>").unwrap();
        fs::write(dir.path().join("fonts/Inter_Bold.woff2"), b"font").unwrap();

        let logger = MemoryLogger::new();
        let mut records = scan_assets(dir.path(), &logger).unwrap();
        records.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].relative_path, "fonts/Inter_Bold.woff2");
        assert_eq!(records[0].path_segments, vec!["fonts", "interBold"]);
        assert_eq!(records[1].relative_path, "icons/social/git-hub.svg");
        assert_eq!(records[1].identifier, "gitHub");
        assert_eq!(records[1].path_segments, vec!["icons", "social", "gitHub"]);
        assert_eq!(
            records[1].absolute_path,
            dir.path().join("icons/social/git-hub.svg")
        );
    }

    #[test]
    fn test_scan_nonexistent_directory_warns() {
        let dir = tempdir().unwrap();
        let logger = MemoryLogger::new();

        let records = scan_assets(&dir.path().join("missing"), &logger).unwrap();

        assert!(records.is_empty());
        let warnings = logger.messages(Level::Warn);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Assets directory not found"));
    }

    #[test]
    fn test_scan_skips_directories_named_like_assets() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("odd.png")).unwrap();
        fs::write(dir.path().join("odd.png/inner.gif"), b"gif").unwrap();

        let logger = MemoryLogger::new();
        let records = scan_assets(dir.path(), &logger).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].relative_path, "odd.png/inner.gif");
        assert_eq!(records[0].path_segments, vec!["odd", "inner"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_skips_dangling_symlink() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("icons")).unwrap();
        fs::write(dir.path().join("icons/logo.png"), b"png").unwrap();
        std::os::unix::fs::symlink("nowhere.png", dir.path().join("icons/broken.png")).unwrap();

        let logger = MemoryLogger::new();
        let records = scan_assets(dir.path(), &logger).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].relative_path, "icons/logo.png");
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_skips_symlink_loop() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("icons")).unwrap();
        fs::write(dir.path().join("icons/logo.png"), b"png").unwrap();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("icons/back")).unwrap();

        let logger = MemoryLogger::new();
        let records = scan_assets(dir.path(), &logger).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].relative_path, "icons/logo.png");
    }

    #[test]
    fn test_normalize_path() {
        let path: PathBuf = ["icons", "social", "github.svg"].iter().collect();
        assert_eq!(normalize_path(&path), "icons/social/github.svg");
    }
}

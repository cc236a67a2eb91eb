//! @ai:module:intent Find markdown documents on disk and scan them
//! @ai:module:layer infrastructure
//! @ai:module:public_api find_markdown_files, scan_file, scan_directory, ScanResult
//! @ai:module:depends_on scanner, error

use crate::error::{Error, Result};
use crate::scanner::{DocumentScanner, ScannedDocument};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// @ai:intent Aggregate outcome of scanning a file or directory
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub files_checked: usize,
    pub records: ScannedDocument,
}

impl ScanResult {
    /// @ai:intent Merge another scan result into this one
    pub fn merge(&mut self, other: ScanResult) {
        self.files_checked += other.files_checked;
        self.records.extend(other.records);
    }
}

/// @ai:intent Check whether a path looks like a markdown document
/// @ai:effects pure
pub fn is_markdown_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "md")
}

/// @ai:intent List every markdown file under a directory, sorted by path
/// @ai:pre dir is an existing directory
/// @ai:effects fs:read
pub fn find_markdown_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::InvalidDirectory(dir.to_path_buf()));
    }

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_markdown_file(e.path()))
        .map(|e| e.path().to_path_buf())
        .collect();

    files.sort();
    Ok(files)
}

/// @ai:intent Read and scan a single document
/// @ai:effects fs:read
pub fn scan_file(path: &Path, scanner: &DocumentScanner) -> Result<ScanResult> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(ScanResult {
        files_checked: 1,
        records: scanner.scan(&content, Some(path)),
    })
}

/// @ai:intent Scan every markdown file under a directory
/// @ai:post unreadable files are logged and skipped
/// @ai:effects fs:read
pub fn scan_directory(dir: &Path, scanner: &DocumentScanner) -> Result<ScanResult> {
    let files = find_markdown_files(dir)?;
    tracing::info!("Checking {} files...", files.len());

    let mut result = ScanResult::default();
    for path in files {
        match scan_file(&path, scanner) {
            Ok(file_result) => result.merge(file_result),
            Err(e) => tracing::warn!("Skipping {}: {}", path.display(), e),
        }
    }

    Ok(result)
}

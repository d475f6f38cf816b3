//! Directory enumeration for bulk ingestion.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A file that could not be ingested during a bulk load.
#[derive(Debug, Clone, Serialize)]
pub struct LoadFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of a bulk load.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    /// Candidate files found.
    pub attempted: usize,
    /// Documents added to the corpus.
    pub loaded: usize,
    pub failures: Vec<LoadFailure>,
}

impl LoadReport {
    pub fn record_failure(&mut self, path: impl Into<PathBuf>, reason: impl Into<String>) {
        self.failures.push(LoadFailure { path: path.into(), reason: reason.into() });
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "succeeded: {} of {}", self.loaded, self.attempted)
    }
}

/// Candidate files directly under `dir`, sorted by file name.
///
/// Returns `None` when `dir` is missing or not a directory. Entries that
/// cannot be inspected, including an unreadable `dir`, come back as failures.
pub fn list_files(dir: &Path, extensions: &[String]) -> Option<(Vec<PathBuf>, Vec<LoadFailure>)> {
    if !dir.is_dir() {
        return None;
    }
    if let Err(err) = std::fs::read_dir(dir) {
        return Some((Vec::new(), vec![LoadFailure { path: dir.to_path_buf(), reason: err.to_string() }]));
    }

    let mut files = Vec::new();
    let mut failures = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        match entry {
            Ok(e) => {
                let p = e.path();
                if e.file_type().is_file() && has_extension(p, extensions) {
                    files.push(p.to_path_buf());
                }
            }
            Err(err) => {
                let path = err.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf());
                failures.push(LoadFailure { path, reason: err.to_string() });
            }
        }
    }
    Some((files, failures))
}

pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    match path.extension().and_then(|s| s.to_str()) {
        Some(ext) => extensions.iter().any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(ext)),
        None => false,
    }
}

/// Document id for a file: its file name.
pub fn document_id(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

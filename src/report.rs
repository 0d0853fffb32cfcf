//! Directory-keyed aggregation of per-file records
//!
//! Every structured report (JSON file tree, CSV, metadata) is built from an
//! `AggregatedReport`: directory key -> filename -> record, both levels in
//! the order files were encountered.

use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;

use crate::digest::DigestRecord;
use crate::tree::FileEntry;

/// Document metadata returned by an external extractor.
pub type Metadata = IndexMap<String, serde_json::Value>;

/// What is known about one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FileRecord {
    Digest(DigestRecord),
    Metadata(Metadata),
}

impl FileRecord {
    pub fn as_digest(&self) -> Option<&DigestRecord> {
        match self {
            FileRecord::Digest(d) => Some(d),
            FileRecord::Metadata(_) => None,
        }
    }
}

impl From<DigestRecord> for FileRecord {
    fn from(record: DigestRecord) -> Self {
        FileRecord::Digest(record)
    }
}

impl From<Metadata> for FileRecord {
    fn from(metadata: Metadata) -> Self {
        FileRecord::Metadata(metadata)
    }
}

/// One CSV row of the file tree report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CsvRow {
    pub path: String,
    pub filename: String,
    pub modified: String,
    pub size: String,
    pub sha256: String,
    pub root: String,
}

/// Directory key -> filename -> record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AggregatedReport {
    directories: IndexMap<String, IndexMap<String, FileRecord>>,
}

impl AggregatedReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold `(entry, record)` pairs under `root` in iteration order.
    pub fn aggregate<I, R>(root: &Path, records: I) -> Self
    where
        I: IntoIterator<Item = (FileEntry, R)>,
        R: Into<FileRecord>,
    {
        let mut report = Self::new();
        for (entry, record) in records {
            report.insert(root, entry.path(), record.into());
        }
        report
    }

    /// Add a record for `path`. A repeated filename in the same directory
    /// replaces the earlier record but keeps its position.
    pub fn insert(&mut self, root: &Path, path: &Path, record: FileRecord) {
        let relative = path.strip_prefix(root).unwrap_or(path);
        let name = relative
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        self.directories
            .entry(directory_key(relative))
            .or_default()
            .insert(name, record);
    }

    pub fn get(&self, directory: &str, filename: &str) -> Option<&FileRecord> {
        self.directories.get(directory)?.get(filename)
    }

    /// Directory keys in first-encounter order.
    pub fn directories(&self) -> impl Iterator<Item = &str> {
        self.directories.keys().map(String::as_str)
    }

    /// Files recorded under one directory key, in insertion order.
    pub fn files_in(&self, directory: &str) -> Option<&IndexMap<String, FileRecord>> {
        self.directories.get(directory)
    }

    pub fn file_count(&self) -> usize {
        self.directories.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.directories.is_empty()
    }

    /// Flatten digest records into CSV rows; `root_name` fills the `root` column.
    /// Metadata-only records have no CSV form and are skipped.
    pub fn rows(&self, root_name: &str) -> Vec<CsvRow> {
        self.directories
            .iter()
            .flat_map(|(dir, files)| {
                files.iter().filter_map(move |(name, record)| {
                    let digest = record.as_digest()?;
                    Some(CsvRow {
                        path: dir.clone(),
                        filename: name.clone(),
                        modified: digest.modified.clone(),
                        size: digest.size_display(),
                        sha256: digest.sha256.clone(),
                        root: root_name.to_string(),
                    })
                })
            })
            .collect()
    }
}

/// String form of the relative path's parent; `.` for files at the root.
fn directory_key(relative: &Path) -> String {
    match relative.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_string_lossy().to_string(),
        _ => ".".to_string(),
    }
}

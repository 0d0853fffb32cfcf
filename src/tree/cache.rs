//! Memoized recursive file scan, one per root

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ignore::WalkBuilder;

use super::filter::ExclusionFilter;
use super::types::FileEntry;

/// Caches the filtered file list of each scanned root.
///
/// Entries stay cached until `clear` or `invalidate` is called. Clear the
/// cache whenever the exclusion configuration changes.
#[derive(Debug, Default)]
pub struct TraversalCache {
    entries: HashMap<PathBuf, Arc<[FileEntry]>>,
    scans: usize,
}

impl TraversalCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return every included regular file under `root`, scanning on first use.
    pub fn files_for(&mut self, root: &Path, filter: &ExclusionFilter) -> Arc<[FileEntry]> {
        if let Some(files) = self.entries.get(root) {
            return Arc::clone(files);
        }
        let files: Arc<[FileEntry]> = scan(root, filter).into();
        self.scans += 1;
        self.entries.insert(root.to_path_buf(), Arc::clone(&files));
        files
    }

    pub fn is_cached(&self, root: &Path) -> bool {
        self.entries.contains_key(root)
    }

    /// Drop the cached list for one root.
    pub fn invalidate(&mut self, root: &Path) {
        self.entries.remove(root);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of disk scans performed so far.
    pub fn scan_count(&self) -> usize {
        self.scans
    }
}

/// Walk `root` recursively without following links or honoring ignore files.
fn scan(root: &Path, filter: &ExclusionFilter) -> Vec<FileEntry> {
    let walker = WalkBuilder::new(root)
        .hidden(false)
        .parents(false)
        .ignore(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!("skipping unreadable path: {}", e);
                continue;
            }
        };
        // Symlinks report their own type here since links are not followed
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let path = entry.into_path();
        if filter.is_included(&path) {
            files.push(FileEntry::new(root, path));
        }
    }
    tracing::debug!(root = %root.display(), files = files.len(), "scan complete");
    files
}

//! Per-invocation state shared by every report

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::digest::{DigestRecord, digest, digest_all};
use crate::error::Result;

use super::cache::TraversalCache;
use super::config::WalkerConfig;
use super::filter::ExclusionFilter;
use super::types::FileEntry;
use super::walker::TreeWalk;

/// Owns the exclusion filter, the traversal cache and the digest memo.
///
/// Build one per invocation and call `reset` when done with a root.
#[derive(Debug)]
pub struct InventoryContext {
    config: WalkerConfig,
    filter: ExclusionFilter,
    cache: TraversalCache,
    digests: HashMap<PathBuf, DigestRecord>,
}

impl InventoryContext {
    pub fn new(config: WalkerConfig) -> Self {
        let filter = ExclusionFilter::new(config.exclude_patterns.clone());
        Self {
            config,
            filter,
            cache: TraversalCache::new(),
            digests: HashMap::new(),
        }
    }

    pub fn config(&self) -> &WalkerConfig {
        &self.config
    }

    pub fn filter(&self) -> &ExclusionFilter {
        &self.filter
    }

    pub fn cache(&self) -> &TraversalCache {
        &self.cache
    }

    /// Replace the exclusion terms. Cached scans are dropped since they
    /// were filtered with the old terms.
    pub fn set_exclusions(&mut self, terms: Vec<String>) {
        self.config.exclude_patterns = terms.clone();
        self.filter = ExclusionFilter::new(terms);
        self.reset();
    }

    /// Included regular files under `root`, scanned at most once per root.
    pub fn files_for(&mut self, root: &Path) -> Arc<[FileEntry]> {
        self.cache.files_for(root, &self.filter)
    }

    /// Start a fresh tree render of `root`.
    pub fn render(&self, root: &Path) -> TreeWalk<'_> {
        TreeWalk::new(root, &self.filter)
    }

    /// Digest every file under `root` in traversal order.
    ///
    /// Files already digested since the last reset are served from the memo;
    /// the rest are hashed with the configured worker count.
    pub fn digests_for(&mut self, root: &Path) -> Vec<(FileEntry, Result<DigestRecord>)> {
        let files = self.files_for(root);

        let pending: Vec<FileEntry> = files
            .iter()
            .filter(|f| !self.digests.contains_key(f.path()))
            .cloned()
            .collect();
        let mut fresh: HashMap<PathBuf, Result<DigestRecord>> =
            digest_all(&pending, self.config.parallel_workers)
                .into_iter()
                .map(|(entry, result)| (entry.path().to_path_buf(), result))
                .collect();

        files
            .iter()
            .map(|entry| {
                let result = match self.digests.get(entry.path()) {
                    Some(record) => Ok(record.clone()),
                    None => {
                        let result = fresh
                            .remove(entry.path())
                            .unwrap_or_else(|| digest(entry));
                        if let Ok(record) = &result {
                            self.digests
                                .insert(entry.path().to_path_buf(), record.clone());
                        }
                        result
                    }
                };
                (entry.clone(), result)
            })
            .collect()
    }

    /// Forget scans and digests, e.g. between roots.
    pub fn reset(&mut self) {
        self.cache.clear();
        self.digests.clear();
    }
}

impl Default for InventoryContext {
    fn default() -> Self {
        Self::new(WalkerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_digests_in_traversal_order() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("a")).unwrap();
        fs::write(dir.path().join("a/x.txt"), "x").unwrap();
        fs::write(dir.path().join("a/y.txt"), "y").unwrap();
        fs::write(dir.path().join("z.txt"), "z").unwrap();

        let mut ctx = InventoryContext::new(WalkerConfig::default().with_workers(2));
        let results = ctx.digests_for(dir.path());
        let names: Vec<String> = results.iter().map(|(e, _)| e.name()).collect();
        assert_eq!(names, vec!["x.txt", "y.txt", "z.txt"]);
        assert!(results.iter().all(|(_, r)| r.is_ok()));
    }

    #[test]
    fn test_digest_memo_survives_until_reset() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("f.txt");
        fs::write(&file, "before").unwrap();

        let mut ctx = InventoryContext::default();
        let first = ctx.digests_for(dir.path());
        fs::write(&file, "after, longer").unwrap();
        let second = ctx.digests_for(dir.path());
        assert_eq!(
            first[0].1.as_ref().unwrap().md5,
            second[0].1.as_ref().unwrap().md5
        );
        assert_eq!(ctx.cache().scan_count(), 1);

        ctx.reset();
        let third = ctx.digests_for(dir.path());
        assert_ne!(
            first[0].1.as_ref().unwrap().md5,
            third[0].1.as_ref().unwrap().md5
        );
    }

    #[test]
    fn test_set_exclusions_drops_cache() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("vendor")).unwrap();
        fs::write(dir.path().join("vendor/lib.c"), "c").unwrap();
        fs::write(dir.path().join("main.c"), "m").unwrap();

        let mut ctx = InventoryContext::default();
        assert_eq!(ctx.files_for(dir.path()).len(), 2);
        ctx.set_exclusions(vec!["vendor".to_string()]);
        assert!(!ctx.cache().is_cached(dir.path()));
        assert_eq!(ctx.files_for(dir.path()).len(), 1);
    }
}

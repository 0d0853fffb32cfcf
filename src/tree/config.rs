//! Configuration types for tree walkers

/// Configuration for traversal and hashing behavior.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Substrings that exclude a path when found in its parent directory.
    pub exclude_patterns: Vec<String>,
    /// Number of parallel workers for hashing.
    /// 0 = auto-detect (use all available cores)
    /// 1 = sequential (no parallelism)
    /// N = use N worker threads
    pub parallel_workers: usize,
}

impl WalkerConfig {
    pub fn new(exclude_patterns: Vec<String>) -> Self {
        Self {
            exclude_patterns,
            ..Default::default()
        }
    }

    pub fn with_workers(mut self, parallel_workers: usize) -> Self {
        self.parallel_workers = parallel_workers;
        self
    }
}

//! Directory traversal and tree rendering
//!
//! Everything that walks the filesystem lives here:
//!
//! - `ExclusionFilter`: substring exclusion on a path's parent directory
//! - `TraversalCache`: one memoized recursive scan per root
//! - `TreeWalk`: lazy, stack-based tree rendering with connector glyphs
//! - `InventoryContext`: per-invocation owner of filter, cache and digest memo

mod cache;
mod config;
mod context;
mod filter;
mod types;
mod walker;

// Re-export public types
pub use cache::TraversalCache;
pub use config::WalkerConfig;
pub use context::InventoryContext;
pub use filter::ExclusionFilter;
pub use types::{DisplayNode, FileEntry, NodeId, NodeKind, TreeCounts, TreeLine};
pub use walker::TreeWalk;

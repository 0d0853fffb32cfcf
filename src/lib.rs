//! Snaptree - directory inventory: tree views, file hashes and checksum reports

pub mod digest;
pub mod error;
pub mod metadata;
pub mod output;
pub mod report;
pub mod runner;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use digest::{ChecksumRecord, DigestRecord, checksum, crc32, digest, digest_all};
pub use error::{InventoryError, Result};
pub use metadata::{CommandExtractor, MetadataExtractor};
pub use output::{OutputConfig, ReportKind};
pub use report::{AggregatedReport, FileRecord, Metadata};
pub use runner::{RootOutcome, Runner, resolve_roots, validate_roots};
pub use tree::{
    ExclusionFilter, FileEntry, InventoryContext, TraversalCache, TreeWalk, WalkerConfig,
};

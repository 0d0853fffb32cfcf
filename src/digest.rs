//! Content hashing for inventory reports
//!
//! A file is read once in fixed-size blocks to produce its MD5 and SHA-256
//! digests together. CRC-32 for checksum lists is a separate pass.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Local, Timelike};
use rayon::prelude::*;
use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::error::{InventoryError, Result};
use crate::tree::FileEntry;

/// Read size for every hashing pass.
pub const BLOCK_SIZE: usize = 65536;

/// Size, mtime and content digests of one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DigestRecord {
    pub modified: String,
    /// Size in KiB rounded to two decimals.
    #[serde(rename = "size", serialize_with = "serialize_kb")]
    pub size_kb: f64,
    pub md5: String,
    pub sha256: String,
}

impl DigestRecord {
    /// Size as shown in reports, e.g. `1.5KB`.
    pub fn size_display(&self) -> String {
        format_kb(self.size_kb)
    }
}

fn serialize_kb<S: Serializer>(
    size_kb: &f64,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_kb(*size_kb))
}

/// CRC-32 of one file, keyed by its path relative to the root's parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecksumRecord {
    pub path: String,
    pub crc32: String,
}

/// MD5 and SHA-256 of a byte stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamDigest {
    pub md5: String,
    pub sha256: String,
    pub bytes: u64,
}

/// Hash a file's contents and collect its size and modification time.
pub fn digest(entry: &FileEntry) -> Result<DigestRecord> {
    let path = entry.path();
    let file = File::open(path).map_err(|e| InventoryError::io(path, e))?;
    let meta = file.metadata().map_err(|e| InventoryError::io(path, e))?;
    let modified = meta
        .modified()
        .map(format_timestamp)
        .map_err(|e| InventoryError::io(path, e))?;

    let stream = digest_reader(file, BLOCK_SIZE).map_err(|e| InventoryError::io(path, e))?;

    Ok(DigestRecord {
        modified,
        size_kb: round_kb(meta.len()),
        md5: stream.md5,
        sha256: stream.sha256,
    })
}

/// Feed `reader` through MD5 and SHA-256 in one pass of `block_size` reads.
pub fn digest_reader<R: Read>(mut reader: R, block_size: usize) -> io::Result<StreamDigest> {
    let mut md5 = md5::Context::new();
    let mut sha = Sha256::new();
    let mut bytes = 0u64;

    for_each_block(&mut reader, block_size, |block| {
        md5.consume(block);
        sha.update(block);
        bytes += block.len() as u64;
    })?;

    Ok(StreamDigest {
        md5: format!("{:x}", md5.compute()),
        sha256: format!("{:x}", sha.finalize()),
        bytes,
    })
}

/// CRC-32 of a file as 8 lower-case hex digits.
pub fn crc32(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|e| InventoryError::io(path, e))?;
    crc32_reader(file, BLOCK_SIZE).map_err(|e| InventoryError::io(path, e))
}

/// CRC-32 of a byte stream read in `block_size` chunks.
pub fn crc32_reader<R: Read>(mut reader: R, block_size: usize) -> io::Result<String> {
    let mut hasher = crc32fast::Hasher::new();
    for_each_block(&mut reader, block_size, |block| hasher.update(block))?;
    Ok(format!("{:08x}", hasher.finalize()))
}

/// Checksum record for `entry`, named relative to the root's parent so the
/// listing starts with the root directory's name.
pub fn checksum(root: &Path, entry: &FileEntry) -> Result<ChecksumRecord> {
    let base = root.parent().unwrap_or(root);
    let relative = entry.path().strip_prefix(base).unwrap_or(entry.path());
    Ok(ChecksumRecord {
        path: relative.to_string_lossy().to_string(),
        crc32: crc32(entry.path())?,
    })
}

/// Digest many files, returning results in input order.
///
/// `workers`: 0 = rayon's global pool, 1 = sequential, N = dedicated pool.
pub fn digest_all(
    entries: &[FileEntry],
    workers: usize,
) -> Vec<(FileEntry, Result<DigestRecord>)> {
    let run = |entry: &FileEntry| (entry.clone(), digest(entry));

    match workers {
        1 => entries.iter().map(run).collect(),
        0 => entries.par_iter().map(run).collect(),
        n => match rayon::ThreadPoolBuilder::new().num_threads(n).build() {
            Ok(pool) => pool.install(|| entries.par_iter().map(run).collect()),
            Err(e) => {
                tracing::warn!("cannot build {} worker pool, using default: {}", n, e);
                entries.par_iter().map(run).collect()
            }
        },
    }
}

fn for_each_block<R: Read, F: FnMut(&[u8])>(
    reader: &mut R,
    block_size: usize,
    mut f: F,
) -> io::Result<()> {
    let mut buffer = vec![0u8; block_size.max(1)];
    loop {
        let n = match reader.read(&mut buffer) {
            Ok(0) => return Ok(()),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        f(&buffer[..n]);
    }
}

/// Bytes to KiB rounded to two decimals, exact ties to even.
pub fn round_kb(bytes: u64) -> f64 {
    (bytes as f64 / 1024.0 * 100.0).round_ties_even() / 100.0
}

/// Format a KiB value with at least one decimal: `0.0KB`, `1.5KB`, `2.25KB`.
pub fn format_kb(size_kb: f64) -> String {
    let mut s = size_kb.to_string();
    if !s.contains('.') {
        s.push_str(".0");
    }
    s.push_str("KB");
    s
}

/// Local time as `YYYY-MM-DD HH:MM:SS[.ffffff]`; the fraction is left out
/// when it is zero.
pub fn format_timestamp(time: SystemTime) -> String {
    let local: DateTime<Local> = time.into();
    if local.nanosecond() / 1000 == 0 {
        local.format("%Y-%m-%d %H:%M:%S").to_string()
    } else {
        local.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
    }
}

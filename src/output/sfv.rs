//! SFV checksum listing

use std::io::Write;
use std::path::Path;

use crate::digest::{ChecksumRecord, checksum};
use crate::error::{InventoryError, Result};
use crate::tree::InventoryContext;

use super::utils::create_report_file;

/// CRC-32 records for every file under `root`, in traversal order.
/// Unreadable files are logged and left out.
pub fn collect_checksums(ctx: &mut InventoryContext, root: &Path) -> Vec<ChecksumRecord> {
    ctx.files_for(root)
        .iter()
        .filter_map(|entry| match checksum(root, entry) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Error creating checksum: {}", e);
                None
            }
        })
        .collect()
}

/// Write `<path> <crc32>` lines.
pub fn write_checksums<W: Write>(out: &mut W, records: &[ChecksumRecord]) -> std::io::Result<()> {
    for record in records {
        writeln!(out, "{} {}", record.path, record.crc32)?;
    }
    out.flush()
}

/// Generate the checksum listing for `root` at `dest`. Returns the number of entries.
pub fn write_sfv(ctx: &mut InventoryContext, root: &Path, dest: &Path) -> Result<usize> {
    let records = collect_checksums(ctx, root);
    let mut out = create_report_file(dest)?;
    write_checksums(&mut out, &records).map_err(|e| InventoryError::write(dest, e))?;
    Ok(records.len())
}

//! JSON report output

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::{InventoryError, Result};
use crate::report::{AggregatedReport, Metadata};
use crate::tree::InventoryContext;

use super::config::NEW_METADATA_DIR;
use super::utils::{create_report_file, output_dir};

/// Serialize `value` as pretty JSON with four-space indentation.
pub fn to_writer_pretty<W: Write, T: Serialize + ?Sized>(out: W, value: &T) -> std::io::Result<()> {
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(out, formatter);
    value
        .serialize(&mut serializer)
        .map_err(std::io::Error::other)
}

/// Write any serializable report to `dest`.
pub fn write_json<T: Serialize + ?Sized>(value: &T, dest: &Path) -> Result<()> {
    let mut out = create_report_file(dest)?;
    to_writer_pretty(&mut out, value)
        .and_then(|_| out.flush())
        .map_err(|e| InventoryError::write(dest, e))
}

/// Write an aggregated report to `dest`.
pub fn write_report(report: &AggregatedReport, dest: &Path) -> Result<()> {
    write_json(report, dest)
}

/// Write one metadata document per file under `<parent>/snaptree/`,
/// mirroring the root's layout. Each document holds the file's digest record
/// under its own name and the extracted metadata under `Metadata`.
///
/// Files that cannot be hashed are logged and skipped. Returns the number of
/// documents written.
pub fn write_new_metadata<F>(
    ctx: &mut InventoryContext,
    root: &Path,
    mut extract: F,
) -> Result<usize>
where
    F: FnMut(&Path) -> Result<Metadata>,
{
    let base = output_dir(root).to_path_buf();
    let mut written = 0;

    for (entry, digest) in ctx.digests_for(root) {
        let digest = match digest {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!("{}", e);
                continue;
            }
        };
        let metadata = match extract(entry.path()) {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!("{}", e);
                continue;
            }
        };

        let relative = entry.path().strip_prefix(&base).unwrap_or(entry.relative());
        let mut dest_dir = base.join(NEW_METADATA_DIR);
        if let Some(parent) = relative.parent() {
            dest_dir.push(parent);
        }
        std::fs::create_dir_all(&dest_dir).map_err(|e| InventoryError::write(&dest_dir, e))?;

        let name = entry.name();
        let mut document = serde_json::Map::new();
        document.insert(
            name.clone(),
            serde_json::to_value(&digest).map_err(|e| InventoryError::write(&dest_dir, e.into()))?,
        );
        document.insert(
            "Metadata".to_string(),
            serde_json::Value::Object(metadata.into_iter().collect()),
        );

        write_json(&document, &dest_dir.join(format!("{}.json", name)))?;
        written += 1;
    }

    Ok(written)
}

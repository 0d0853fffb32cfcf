//! CSV flattening of the file tree report

use std::io::Write;
use std::path::Path;

use crate::error::{InventoryError, Result};
use crate::report::{AggregatedReport, CsvRow};

use super::utils::{create_report_file, root_name};

/// Write rows with the header `path,filename,modified,size,sha256,root`.
pub fn write_rows<W: Write>(out: W, rows: &[CsvRow]) -> std::io::Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for row in rows {
        writer.serialize(row)?;
    }
    if rows.is_empty() {
        writer.write_record(["path", "filename", "modified", "size", "sha256", "root"])?;
    }
    writer.flush()
}

/// Flatten `report` for `root` into a CSV file at `dest`.
pub fn write_csv(report: &AggregatedReport, root: &Path, dest: &Path) -> Result<()> {
    let rows = report.rows(&root_name(root));
    let out = create_report_file(dest)?;
    write_rows(out, &rows).map_err(|e| InventoryError::write(dest, e))
}

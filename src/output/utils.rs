//! Shared helpers for report output

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::error::{InventoryError, Result};

/// Final path component of the root, used to name its reports.
pub fn root_name(root: &Path) -> String {
    root.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| root.to_string_lossy().to_string())
}

/// Directory that receives a root's reports: the root's parent.
pub fn output_dir(root: &Path) -> &Path {
    root.parent().unwrap_or(root)
}

/// Where a report file named `file_name` for `root` is written.
pub fn output_path(root: &Path, file_name: &str) -> PathBuf {
    output_dir(root).join(file_name)
}

/// Create (or truncate) a buffered report file.
pub fn create_report_file(path: &Path) -> Result<BufWriter<File>> {
    tracing::info!("Creating: {}", path.display());
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| InventoryError::write(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_land_next_to_root() {
        let root = Path::new("/data/photos");
        assert_eq!(root_name(root), "photos");
        assert_eq!(
            output_path(root, "photos.sfv"),
            PathBuf::from("/data/photos.sfv")
        );
    }
}

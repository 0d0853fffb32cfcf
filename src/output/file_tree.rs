//! File tree and metadata reports built on `AggregatedReport`

use std::path::Path;

use crate::error::Result;
use crate::metadata::MetadataExtractor;
use crate::report::{AggregatedReport, FileRecord};
use crate::tree::InventoryContext;

use super::json::write_report;
use super::table::write_csv;

/// Digest every file under `root` and aggregate the records.
/// Files that cannot be read are logged and left out.
pub fn build_file_tree(ctx: &mut InventoryContext, root: &Path) -> AggregatedReport {
    let mut report = AggregatedReport::new();
    for (entry, digest) in ctx.digests_for(root) {
        match digest {
            Ok(record) => report.insert(root, entry.path(), FileRecord::Digest(record)),
            Err(e) => tracing::warn!("{}", e),
        }
    }
    report
}

/// Write the JSON and CSV file tree reports for `root`.
pub fn write_file_tree(
    ctx: &mut InventoryContext,
    root: &Path,
    json_dest: &Path,
    csv_dest: &Path,
) -> Result<AggregatedReport> {
    let report = build_file_tree(ctx, root);
    write_report(&report, json_dest)?;
    write_csv(&report, root, csv_dest)?;
    Ok(report)
}

/// Run the extractor over every file under `root` and aggregate its output.
/// Extraction failures are logged and the file is left out.
pub fn build_metadata_report(
    ctx: &mut InventoryContext,
    root: &Path,
    extractor: &dyn MetadataExtractor,
) -> AggregatedReport {
    let files = ctx.files_for(root);
    let mut report = AggregatedReport::new();
    for entry in files.iter() {
        match extractor.extract(entry.path()) {
            Ok(metadata) => report.insert(root, entry.path(), FileRecord::Metadata(metadata)),
            Err(e) => tracing::warn!("{}", e),
        }
    }
    report
}

/// Write the metadata report for `root` at `dest`.
pub fn write_metadata(
    ctx: &mut InventoryContext,
    root: &Path,
    dest: &Path,
    extractor: &dyn MetadataExtractor,
) -> Result<AggregatedReport> {
    let report = build_metadata_report(ctx, root, extractor);
    write_report(&report, dest)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InventoryError;
    use crate::report::Metadata;
    use std::fs;
    use tempfile::TempDir;

    struct NameExtractor;

    impl MetadataExtractor for NameExtractor {
        fn extract(&self, path: &Path) -> Result<Metadata> {
            let name = path.file_name().unwrap().to_string_lossy().to_string();
            if name.starts_with("corrupt") {
                return Err(InventoryError::MetadataExtraction {
                    path: path.to_path_buf(),
                    message: "unsupported format".to_string(),
                });
            }
            let mut meta = Metadata::new();
            meta.insert("resourceName".to_string(), serde_json::json!(name));
            Ok(meta)
        }
    }

    fn sample_root(dir: &TempDir) -> std::path::PathBuf {
        let root = dir.path().join("root");
        fs::create_dir_all(root.join("a")).unwrap();
        fs::write(root.join("a/x.txt"), "x").unwrap();
        fs::write(root.join("a/y.txt"), "y").unwrap();
        fs::write(root.join("corrupt.doc"), "??").unwrap();
        root
    }

    #[test]
    fn test_file_tree_json_and_csv() {
        let dir = TempDir::new().unwrap();
        let root = sample_root(&dir);
        let json_dest = dir.path().join("root_file_tree.json");
        let csv_dest = dir.path().join("root_file_tree.csv");

        let mut ctx = InventoryContext::default();
        let report = write_file_tree(&mut ctx, &root, &json_dest, &csv_dest).unwrap();
        assert_eq!(report.file_count(), 3);

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&json_dest).unwrap()).unwrap();
        let a = json["a"].as_object().unwrap();
        assert_eq!(a.len(), 2);
        assert_eq!(a["x.txt"]["md5"], "9dd4e461268c8034f5c8564e155c67a6");
        assert_eq!(json["."]["corrupt.doc"]["size"], "0.0KB");

        let csv = fs::read_to_string(&csv_dest).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "path,filename,modified,size,sha256,root");
        assert!(lines[1].starts_with("a,x.txt,"));
        assert!(lines[1].ends_with(",root"));
    }

    #[test]
    fn test_metadata_report_skips_failures() {
        let dir = TempDir::new().unwrap();
        let root = sample_root(&dir);
        let mut ctx = InventoryContext::default();
        let report = build_metadata_report(&mut ctx, &root, &NameExtractor);
        assert_eq!(report.file_count(), 2);
        assert!(report.get(".", "corrupt.doc").is_none());
        match report.get("a", "y.txt").unwrap() {
            FileRecord::Metadata(meta) => assert_eq!(meta["resourceName"], "y.txt"),
            other => panic!("expected metadata, got {:?}", other),
        }
    }

    #[test]
    fn test_reports_share_one_scan() {
        let dir = TempDir::new().unwrap();
        let root = sample_root(&dir);
        let mut ctx = InventoryContext::default();
        build_file_tree(&mut ctx, &root);
        build_metadata_report(&mut ctx, &root, &NameExtractor);
        assert_eq!(ctx.cache().scan_count(), 1);
    }
}

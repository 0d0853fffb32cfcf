//! Directory tree text report
//!
//! Layout:
//!
//! ```text
//! snaptree 0.1.0
//! 2 directories, 3 files
//!
//! root/
//! ├── a/
//! │   └── x.txt
//! └── b/
//! ```

use std::io::Write;
use std::path::Path;

use crate::error::{InventoryError, Result};
use crate::tree::{InventoryContext, TreeCounts};

use super::utils::create_report_file;

/// Tool name and version written at the top of the tree report.
pub fn version_line() -> String {
    format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

/// Render the tree of `root`, returning its lines and totals.
pub fn render_tree(ctx: &InventoryContext, root: &Path) -> (Vec<String>, TreeCounts) {
    let mut walk = ctx.render(root);
    let lines: Vec<String> = walk.by_ref().map(|line| line.text).collect();
    (lines, walk.counts())
}

/// Write the header and rendered tree to `out`.
pub fn write_tree<W: Write>(
    out: &mut W,
    lines: &[String],
    counts: TreeCounts,
) -> std::io::Result<()> {
    writeln!(out, "{}", version_line())?;
    writeln!(
        out,
        "{} directories, {} files",
        counts.directories, counts.files
    )?;
    writeln!(out)?;
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    out.flush()
}

/// Generate the directory tree report for `root` at `dest`.
pub fn write_directory_tree(
    ctx: &InventoryContext,
    root: &Path,
    dest: &Path,
) -> Result<TreeCounts> {
    let (lines, counts) = render_tree(ctx, root);
    let mut out = create_report_file(dest)?;
    write_tree(&mut out, &lines, counts).map_err(|e| InventoryError::write(dest, e))?;
    tracing::debug!(
        directories = counts.directories,
        files = counts.files,
        "directory tree written"
    );
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_report_layout() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("root");
        fs::create_dir_all(root.join("a")).unwrap();
        fs::create_dir_all(root.join("b")).unwrap();
        fs::write(root.join("a/x.txt"), "x").unwrap();

        let ctx = InventoryContext::default();
        let dest = dir.path().join("root_directory_tree.txt");
        let counts = write_directory_tree(&ctx, &root, &dest).unwrap();
        assert_eq!(counts, TreeCounts { directories: 2, files: 1 });

        let text = fs::read_to_string(&dest).unwrap();
        let expected = format!(
            "{}\n2 directories, 1 files\n\nroot/\n├── a/\n│   └── x.txt\n└── b/\n",
            version_line()
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_version_line() {
        assert!(version_line().starts_with("snaptree "));
    }
}

//! Report generation
//!
//! Every report is written next to the root (into its parent directory) and
//! named after it:
//!
//! - `tree` - `<root>_directory_tree.txt`, the rendered tree with a summary header
//! - `sfv` - `<root>.sfv`, CRC-32 per file
//! - `file_tree` - `<root>_file_tree.json`, `<root>_file_tree.csv` and `<root>_metadata.json`
//! - `table` - CSV flattening of the file tree
//! - `json` - JSON writing and per-file metadata documents
//! - `overwrite` - what to do when a report file already exists

mod config;
mod file_tree;
mod json;
mod overwrite;
mod sfv;
mod table;
mod tree;
mod utils;

// Re-export public types and functions
pub use config::{NEW_METADATA_DIR, OutputConfig, ReportKind};
pub use file_tree::{build_file_tree, build_metadata_report, write_file_tree, write_metadata};
pub use json::{to_writer_pretty, write_json, write_new_metadata, write_report};
pub use overwrite::confirm_overwrite;
pub use sfv::{collect_checksums, write_checksums, write_sfv};
pub use table::{write_csv, write_rows};
pub use tree::{render_tree, version_line, write_directory_tree, write_tree};
pub use utils::{output_dir, output_path, root_name};

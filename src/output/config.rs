//! Output configuration types

use std::path::{Path, PathBuf};

use super::utils::{output_path, root_name};

/// Name of the directory that holds per-file metadata documents.
pub const NEW_METADATA_DIR: &str = "snaptree";

/// A report that can be generated for a root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    /// Rendered directory tree text
    DirectoryTree,
    /// SFV-style CRC-32 listing
    Checksums,
    /// JSON and CSV file tree with digests
    FileTree,
    /// JSON of extracted document metadata
    Metadata,
    /// One metadata JSON document per file
    NewMetadata,
}

impl ReportKind {
    /// Whether the report needs a metadata extractor.
    pub fn needs_extractor(&self) -> bool {
        matches!(self, ReportKind::Metadata | ReportKind::NewMetadata)
    }

    /// Files this report writes next to `root`, checked by the overwrite policy.
    /// Per-file metadata documents are replaced unconditionally and are not listed.
    pub fn output_files(&self, root: &Path) -> Vec<PathBuf> {
        let name = root_name(root);
        let file_names = match self {
            ReportKind::DirectoryTree => vec![format!("{}_directory_tree.txt", name)],
            ReportKind::Checksums => vec![format!("{}.sfv", name)],
            ReportKind::FileTree => vec![
                format!("{}_file_tree.json", name),
                format!("{}_file_tree.csv", name),
            ],
            ReportKind::Metadata => vec![format!("{}_metadata.json", name)],
            ReportKind::NewMetadata => Vec::new(),
        };
        file_names
            .into_iter()
            .map(|f| output_path(root, &f))
            .collect()
    }
}

/// Configuration for report generation.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Reports to generate, in order.
    pub reports: Vec<ReportKind>,
    /// Delete existing outputs without asking.
    pub assume_yes: bool,
}

impl OutputConfig {
    /// Reports run when none are requested explicitly.
    pub fn default_reports(with_metadata: bool) -> Vec<ReportKind> {
        let mut reports = vec![
            ReportKind::DirectoryTree,
            ReportKind::Checksums,
            ReportKind::FileTree,
        ];
        if with_metadata {
            reports.push(ReportKind::Metadata);
        }
        reports
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            reports: Self::default_reports(false),
            assume_yes: false,
        }
    }
}

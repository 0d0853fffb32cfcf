//! Per-root report orchestration
//!
//! The runner validates every root up front, then processes roots one at a
//! time. A failing report (declined overwrite, unwritable output) is recorded
//! and the next report runs; per-file problems never reach this level.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::error::{InventoryError, Result};
use crate::metadata::MetadataExtractor;
use crate::output::{
    OutputConfig, ReportKind, confirm_overwrite, write_directory_tree, write_file_tree,
    write_metadata, write_new_metadata, write_sfv,
};
use crate::tree::InventoryContext;

/// Check that every root is an existing directory before any work starts.
pub fn validate_roots(roots: &[PathBuf]) -> Result<()> {
    match roots.iter().find(|root| !root.is_dir()) {
        Some(root) => Err(InventoryError::RootNotFound { path: root.clone() }),
        None => Ok(()),
    }
}

/// Validate `roots` and resolve each to its canonical absolute path, so
/// `..` or `.` roots get a real name and a real parent to write into.
pub fn resolve_roots(roots: &[PathBuf]) -> Result<Vec<PathBuf>> {
    validate_roots(roots)?;
    roots
        .iter()
        .map(|root| {
            std::fs::canonicalize(root)
                .map_err(|_| InventoryError::RootNotFound { path: root.clone() })
        })
        .collect()
}

/// Result of processing one root.
#[derive(Debug)]
pub struct RootOutcome {
    pub root: PathBuf,
    pub completed: Vec<ReportKind>,
    pub failures: Vec<(ReportKind, InventoryError)>,
}

impl RootOutcome {
    fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            completed: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs the configured reports for each root against one `InventoryContext`.
pub struct Runner<'a> {
    ctx: InventoryContext,
    config: OutputConfig,
    extractor: Option<&'a dyn MetadataExtractor>,
}

impl<'a> Runner<'a> {
    pub fn new(ctx: InventoryContext, config: OutputConfig) -> Self {
        Self {
            ctx,
            config,
            extractor: None,
        }
    }

    pub fn with_extractor(mut self, extractor: &'a dyn MetadataExtractor) -> Self {
        self.extractor = Some(extractor);
        self
    }

    pub fn context(&self) -> &InventoryContext {
        &self.ctx
    }

    /// Generate every configured report for `root`.
    ///
    /// Overwrite questions are asked on `prompt` and answered from `input`.
    /// The context is reset afterwards so the next root starts clean.
    pub fn run_root<R: BufRead, W: Write>(
        &mut self,
        root: &Path,
        input: &mut R,
        prompt: &mut W,
    ) -> RootOutcome {
        let _span = tracing::info_span!("root", path = %root.display()).entered();
        let mut outcome = RootOutcome::new(root);

        for kind in self.config.reports.clone() {
            match self.run_report(kind, root, input, prompt) {
                Ok(()) => outcome.completed.push(kind),
                Err(e) => {
                    tracing::error!("{:?} report failed: {}", kind, e);
                    outcome.failures.push((kind, e));
                }
            }
        }

        self.ctx.reset();
        outcome
    }

    fn run_report<R: BufRead, W: Write>(
        &mut self,
        kind: ReportKind,
        root: &Path,
        input: &mut R,
        prompt: &mut W,
    ) -> Result<()> {
        let outputs = kind.output_files(root);
        for path in &outputs {
            confirm_overwrite(path, self.config.assume_yes, input, prompt)?;
        }

        match kind {
            ReportKind::DirectoryTree => {
                write_directory_tree(&self.ctx, root, &outputs[0])?;
            }
            ReportKind::Checksums => {
                write_sfv(&mut self.ctx, root, &outputs[0])?;
            }
            ReportKind::FileTree => {
                write_file_tree(&mut self.ctx, root, &outputs[0], &outputs[1])?;
            }
            ReportKind::Metadata => match self.extractor {
                Some(extractor) => {
                    write_metadata(&mut self.ctx, root, &outputs[0], extractor)?;
                }
                None => tracing::warn!("no metadata extractor configured, skipping metadata"),
            },
            ReportKind::NewMetadata => match self.extractor {
                Some(extractor) => {
                    let written =
                        write_new_metadata(&mut self.ctx, root, |path| extractor.extract(path))?;
                    tracing::info!("wrote {} metadata documents", written);
                }
                None => tracing::warn!("no metadata extractor configured, skipping new metadata"),
            },
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Metadata;
    use crate::tree::WalkerConfig;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    struct EmptyExtractor;

    impl MetadataExtractor for EmptyExtractor {
        fn extract(&self, _path: &Path) -> Result<Metadata> {
            Ok(Metadata::new())
        }
    }

    fn sample_root(dir: &TempDir) -> PathBuf {
        let root = dir.path().join("root");
        fs::create_dir_all(root.join("a")).unwrap();
        fs::write(root.join("a/x.txt"), "x").unwrap();
        fs::write(root.join("a/y.txt"), "y").unwrap();
        root
    }

    #[test]
    fn test_validate_roots() {
        let dir = TempDir::new().unwrap();
        let root = sample_root(&dir);
        assert!(validate_roots(std::slice::from_ref(&root)).is_ok());

        let missing = dir.path().join("missing");
        let err = validate_roots(&[root, missing.clone()]).unwrap_err();
        match err {
            InventoryError::RootNotFound { path } => assert_eq!(path, missing),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_resolve_roots_names_dot_dot() {
        let dir = TempDir::new().unwrap();
        let root = sample_root(&dir);
        let via_parent = root.join("a").join("..");
        assert_eq!(via_parent.file_name(), None);

        let resolved = resolve_roots(&[via_parent]).unwrap();
        assert_eq!(resolved, vec![fs::canonicalize(&root).unwrap()]);
        assert_eq!(resolved[0].file_name().unwrap(), "root");

        let missing = dir.path().join("missing");
        assert!(matches!(
            resolve_roots(&[missing]),
            Err(InventoryError::RootNotFound { .. })
        ));
    }

    #[test]
    fn test_default_reports_written() {
        let dir = TempDir::new().unwrap();
        let root = sample_root(&dir);
        let mut runner = Runner::new(InventoryContext::default(), OutputConfig::default());
        let outcome = runner.run_root(&root, &mut Cursor::new(""), &mut Vec::new());

        assert!(outcome.is_success());
        assert_eq!(outcome.completed.len(), 3);
        for name in [
            "root_directory_tree.txt",
            "root.sfv",
            "root_file_tree.json",
            "root_file_tree.csv",
        ] {
            assert!(dir.path().join(name).exists(), "missing {}", name);
        }
        assert!(!runner.context().cache().is_cached(&root));
    }

    #[test]
    fn test_declined_overwrite_fails_only_that_report() {
        let dir = TempDir::new().unwrap();
        let root = sample_root(&dir);
        let sfv = dir.path().join("root.sfv");
        fs::write(&sfv, "keep me").unwrap();

        let mut runner = Runner::new(InventoryContext::default(), OutputConfig::default());
        let outcome = runner.run_root(&root, &mut Cursor::new("N\n"), &mut Vec::new());

        assert_eq!(fs::read_to_string(&sfv).unwrap(), "keep me");
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].0, ReportKind::Checksums);
        assert!(matches!(
            outcome.failures[0].1,
            InventoryError::OutputExists { .. }
        ));
        assert!(outcome.completed.contains(&ReportKind::DirectoryTree));
        assert!(outcome.completed.contains(&ReportKind::FileTree));
    }

    #[test]
    fn test_assume_yes_replaces_existing() {
        let dir = TempDir::new().unwrap();
        let root = sample_root(&dir);
        let sfv = dir.path().join("root.sfv");
        fs::write(&sfv, "stale").unwrap();

        let config = OutputConfig {
            reports: vec![ReportKind::Checksums],
            assume_yes: true,
        };
        let mut runner = Runner::new(InventoryContext::default(), config);
        let outcome = runner.run_root(&root, &mut Cursor::new(""), &mut Vec::new());
        assert!(outcome.is_success());
        assert!(fs::read_to_string(&sfv).unwrap().contains("root/a/x.txt"));
    }

    #[test]
    fn test_exclusions_apply_to_every_report() {
        let dir = TempDir::new().unwrap();
        let root = sample_root(&dir);
        fs::create_dir_all(root.join("skipdir")).unwrap();
        fs::write(root.join("skipdir/secret.txt"), "s").unwrap();

        let ctx = InventoryContext::new(WalkerConfig::new(vec!["skipdir".to_string()]));
        let mut runner = Runner::new(ctx, OutputConfig::default());
        runner.run_root(&root, &mut Cursor::new(""), &mut Vec::new());

        let sfv = fs::read_to_string(dir.path().join("root.sfv")).unwrap();
        assert!(!sfv.contains("secret.txt"));
        let tree = fs::read_to_string(dir.path().join("root_directory_tree.txt")).unwrap();
        assert!(!tree.contains("secret.txt"));
        assert!(tree.contains("2 directories, 2 files"));
    }

    #[test]
    fn test_metadata_reports_with_extractor() {
        let dir = TempDir::new().unwrap();
        let root = sample_root(&dir);
        let config = OutputConfig {
            reports: vec![ReportKind::Metadata, ReportKind::NewMetadata],
            assume_yes: false,
        };
        let extractor = EmptyExtractor;
        let mut runner =
            Runner::new(InventoryContext::default(), config).with_extractor(&extractor);
        let outcome = runner.run_root(&root, &mut Cursor::new(""), &mut Vec::new());
        assert!(outcome.is_success());
        assert!(dir.path().join("root_metadata.json").exists());
        assert!(dir.path().join("snaptree/root/a/x.txt.json").exists());
    }
}

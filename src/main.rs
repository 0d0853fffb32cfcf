//! CLI entry point for snaptree

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::Parser;
use snaptree::{
    CommandExtractor, InventoryContext, OutputConfig, ReportKind, Runner, WalkerConfig,
    resolve_roots,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "snaptree")]
#[command(about = "Inventory directories: tree view, file hashes, checksums and metadata")]
#[command(version)]
struct Args {
    /// Directories to inventory
    #[arg(value_name = "DIRECTORY", required = true)]
    directories: Vec<PathBuf>,

    /// Write <name>_directory_tree.txt
    #[arg(short = 'd', long = "directory-tree")]
    directory_tree: bool,

    /// Write <name>.sfv with a CRC-32 per file
    #[arg(short = 's', long = "sfv")]
    sfv: bool,

    /// Write <name>_file_tree.json and <name>_file_tree.csv
    #[arg(short = 'f', long = "file-tree")]
    file_tree: bool,

    /// Write <name>_metadata.json (requires --extractor)
    #[arg(short = 'm', long = "metadata", requires = "extractor")]
    metadata: bool,

    /// Write one metadata JSON file per input file (requires --extractor)
    #[arg(short = 'n', long = "new-metadata", requires = "extractor")]
    new_metadata: bool,

    /// Skip files whose parent path contains any of these strings
    #[arg(short = 'e', long = "exclude", num_args = 1.., value_name = "TERM")]
    exclude: Vec<String>,

    /// Delete existing output files without asking
    #[arg(short = 'y', long = "yes")]
    yes: bool,

    /// Number of parallel hashing workers
    /// (0 = auto-detect, 1 = sequential, N = use N workers)
    #[arg(short = 'j', long = "jobs", default_value = "0")]
    jobs: usize,

    /// Metadata extractor command; the file path is appended
    /// (e.g. "java -jar tika-app.jar --json")
    #[arg(short = 'x', long = "extractor", value_name = "CMD")]
    extractor: Option<String>,

    /// Default log filter; SNAPTREE_LOG takes precedence
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

impl Args {
    fn reports(&self) -> Vec<ReportKind> {
        let selected: Vec<ReportKind> = [
            (self.directory_tree, ReportKind::DirectoryTree),
            (self.sfv, ReportKind::Checksums),
            (self.file_tree, ReportKind::FileTree),
            (self.metadata, ReportKind::Metadata),
            (self.new_metadata, ReportKind::NewMetadata),
        ]
        .into_iter()
        .filter_map(|(on, kind)| on.then_some(kind))
        .collect();

        if selected.is_empty() {
            OutputConfig::default_reports(self.extractor.is_some())
        } else {
            selected
        }
    }
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_env("SNAPTREE_LOG")
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(io::stdout().is_terminal())
        .with_writer(io::stdout)
        .init();
}

fn main() {
    let args = Args::parse();
    init_tracing(&args.log_level);
    let started = Instant::now();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("snaptree: cannot read current directory: {}", e);
            process::exit(1);
        }
    };
    let requested: Vec<PathBuf> = args.directories.iter().map(|d| cwd.join(d)).collect();

    let roots = match resolve_roots(&requested) {
        Ok(roots) => roots,
        Err(e) => {
            tracing::error!("{}", e);
            process::exit(1);
        }
    };

    let extractor = match args.extractor.as_deref() {
        Some(command) => match CommandExtractor::from_command_line(command) {
            Some(extractor) => Some(extractor),
            None => {
                eprintln!("snaptree: --extractor must not be empty");
                process::exit(1);
            }
        },
        None => None,
    };

    let walker_config = WalkerConfig::new(args.exclude.clone()).with_workers(args.jobs);
    let output_config = OutputConfig {
        reports: args.reports(),
        assume_yes: args.yes,
    };

    let mut runner = Runner::new(InventoryContext::new(walker_config), output_config);
    if let Some(extractor) = extractor.as_ref() {
        runner = runner.with_extractor(extractor);
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut prompt = io::stdout();
    let mut failed = false;

    for root in &roots {
        let outcome = runner.run_root(root, &mut input, &mut prompt);
        failed |= !outcome.is_success();
    }

    tracing::info!(
        "Finished in {}",
        humantime::format_duration(std::time::Duration::from_millis(
            started.elapsed().as_millis() as u64
        ))
    );

    if failed {
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_extractor() {
        let args = Args::parse_from(["snaptree", "dir"]);
        assert_eq!(
            args.reports(),
            vec![
                ReportKind::DirectoryTree,
                ReportKind::Checksums,
                ReportKind::FileTree
            ]
        );
        assert_eq!(args.jobs, 0);
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_defaults_with_extractor_include_metadata() {
        let args = Args::parse_from(["snaptree", "dir", "-x", "tika --json"]);
        assert!(args.reports().contains(&ReportKind::Metadata));
    }

    #[test]
    fn test_explicit_reports_only() {
        let args = Args::parse_from(["snaptree", "-s", "-d", "a", "b"]);
        assert_eq!(
            args.reports(),
            vec![ReportKind::DirectoryTree, ReportKind::Checksums]
        );
        assert_eq!(args.directories.len(), 2);
    }

    #[test]
    fn test_metadata_requires_extractor() {
        assert!(Args::try_parse_from(["snaptree", "-m", "dir"]).is_err());
        assert!(Args::try_parse_from(["snaptree", "-n", "dir"]).is_err());
    }

    #[test]
    fn test_multiple_exclusions() {
        let args = Args::parse_from(["snaptree", "dir", "-e", "build", "cache"]);
        assert_eq!(args.exclude, vec!["build", "cache"]);
    }

    #[test]
    fn test_requires_directory() {
        assert!(Args::try_parse_from(["snaptree"]).is_err());
    }
}

//! Test utilities for building temporary directory trees.
//!
//! This module is only compiled for tests and benchmarks.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory holding one inventory root.
///
/// Reports land next to the root, inside the temporary directory, so
/// everything is cleaned up when the tree is dropped.
pub struct TestTree {
    dir: TempDir,
    root: PathBuf,
}

impl TestTree {
    /// Create an empty root named `name`.
    pub fn new(name: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let root = dir.path().join(name);
        fs::create_dir_all(&root).expect("Failed to create root");
        Self { dir, root }
    }

    /// The directory that contains the root and receives the reports.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// The inventory root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create a file under the root, along with any missing parents.
    pub fn add_file(&self, path: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Create an empty directory under the root.
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.root.join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    /// Create a symlink at `link` pointing to `target`, both relative to the root.
    #[cfg(unix)]
    pub fn add_symlink(&self, target: &str, link: &str) -> PathBuf {
        let link_path = self.root.join(link);
        std::os::unix::fs::symlink(self.root.join(target), &link_path)
            .expect("Failed to create symlink");
        link_path
    }

    /// Read a report written next to the root.
    pub fn read_output(&self, file_name: &str) -> String {
        fs::read_to_string(self.dir.path().join(file_name)).expect("Failed to read output")
    }

    /// Populate a tree with `files` files spread over `dirs` directories.
    pub fn populate(&self, dirs: usize, files: usize, size: usize) {
        let content = vec![b'x'; size];
        for i in 0..files {
            self.add_file(&format!("dir{}/file{}.dat", i % dirs.max(1), i), &content);
        }
    }
}

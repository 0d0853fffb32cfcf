//! Data types produced by traversal and rendering

use std::path::{Path, PathBuf};

/// A regular file discovered under a root during one scan.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileEntry {
    path: PathBuf,
    relative: PathBuf,
}

impl FileEntry {
    /// Build an entry for `path`, which must live under `root`.
    pub fn new(root: &Path, path: PathBuf) -> Self {
        let relative = path
            .strip_prefix(root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.clone());
        Self { path, relative }
    }

    /// Absolute path of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path relative to the root it was found under.
    pub fn relative(&self) -> &Path {
        &self.relative
    }

    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

/// Index of a display node inside the walker's arena.
pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Dir,
    File,
}

/// One node of the rendered tree.
#[derive(Debug, Clone)]
pub struct DisplayNode {
    pub path: PathBuf,
    pub kind: NodeKind,
    /// Parent directory in the arena; `None` only for the root.
    pub parent: Option<NodeId>,
    pub depth: usize,
    pub is_last: bool,
}

impl DisplayNode {
    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Dir
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Name shown in the tree; directories get a trailing `/`.
    pub fn display_name(&self) -> String {
        let name = self
            .path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.to_string_lossy().to_string());
        match self.kind {
            NodeKind::Dir => format!("{}/", name),
            NodeKind::File => name,
        }
    }
}

/// A rendered node together with its text line.
#[derive(Debug, Clone)]
pub struct TreeLine {
    pub node: DisplayNode,
    pub text: String,
}

/// Directory and file totals for one render pass. The root is not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeCounts {
    pub directories: usize,
    pub files: usize,
}

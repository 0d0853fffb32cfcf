//! TreeWalk - lazy depth-first rendering of a directory tree

use std::path::{Path, PathBuf};

use super::filter::ExclusionFilter;
use super::types::{DisplayNode, NodeId, NodeKind, TreeCounts, TreeLine};

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE_PREFIX: &str = "│   ";
const SPACE_PREFIX: &str = "    ";

/// Sorted children of one directory still waiting to be visited.
#[derive(Debug)]
struct Frame {
    node: NodeId,
    children: Vec<PathBuf>,
    next: usize,
}

/// Stack-based pre-order walk yielding one `TreeLine` per rendered node.
///
/// Directory nodes are kept in an arena so descendants can rebuild their
/// prefix by following parent indices. Counters start at zero for every walk;
/// call `counts` once the iterator is exhausted for the totals.
pub struct TreeWalk<'a> {
    root: PathBuf,
    filter: &'a ExclusionFilter,
    arena: Vec<DisplayNode>,
    stack: Vec<Frame>,
    counts: TreeCounts,
    started: bool,
}

impl<'a> TreeWalk<'a> {
    pub fn new(root: &Path, filter: &'a ExclusionFilter) -> Self {
        Self {
            root: root.to_path_buf(),
            filter,
            arena: Vec::new(),
            stack: Vec::new(),
            counts: TreeCounts::default(),
            started: false,
        }
    }

    /// Directories and files emitted so far.
    pub fn counts(&self) -> TreeCounts {
        self.counts
    }

    /// Render a node to its tree line, e.g. `│   └── name`.
    pub fn displayable(&self, node: &DisplayNode) -> String {
        let Some(first_parent) = node.parent else {
            return node.display_name();
        };

        let connector = if node.is_last { LAST_BRANCH } else { BRANCH };
        let mut parts = vec![format!("{}{}", connector, node.display_name())];

        let mut parent = Some(first_parent);
        while let Some(id) = parent {
            let ancestor = &self.arena[id];
            // The root contributes no prefix segment
            if ancestor.parent.is_none() {
                break;
            }
            parts.push(if ancestor.is_last { SPACE_PREFIX } else { PIPE_PREFIX }.to_string());
            parent = ancestor.parent;
        }

        parts.reverse();
        parts.concat()
    }

    /// Push a directory into the arena and queue its children.
    fn enter_dir(&mut self, node: DisplayNode) -> DisplayNode {
        let id = self.arena.len();
        self.arena.push(node.clone());
        let children = self.list_children(&node.path);
        self.stack.push(Frame {
            node: id,
            children,
            next: 0,
        });
        node
    }

    /// Included children of `dir`, sorted case-insensitively.
    /// Listing failures leave the directory empty.
    fn list_children(&self, dir: &Path) -> Vec<PathBuf> {
        let entries = match std::fs::read_dir(dir) {
            Ok(e) => e,
            Err(e) => {
                tracing::debug!("cannot list {}: {}", dir.display(), e);
                return Vec::new();
            }
        };

        let mut children: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| self.filter.is_included(p))
            .collect();
        children.sort_by_cached_key(|p| p.to_string_lossy().to_lowercase());
        children
    }

    fn line(&self, node: DisplayNode) -> TreeLine {
        let text = self.displayable(&node);
        TreeLine { node, text }
    }
}

impl Iterator for TreeWalk<'_> {
    type Item = TreeLine;

    fn next(&mut self) -> Option<TreeLine> {
        if !self.started {
            self.started = true;
            let root = DisplayNode {
                path: self.root.clone(),
                kind: NodeKind::Dir,
                parent: None,
                depth: 0,
                is_last: false,
            };
            let root = self.enter_dir(root);
            return Some(self.line(root));
        }

        loop {
            let frame = self.stack.last_mut()?;
            if frame.next >= frame.children.len() {
                self.stack.pop();
                continue;
            }

            let index = frame.next;
            frame.next += 1;
            let is_last = index == frame.children.len() - 1;
            let path = frame.children[index].clone();
            let parent = frame.node;
            let depth = self.arena[parent].depth + 1;

            // Links are neither followed nor shown
            if path.is_symlink() {
                continue;
            }

            if path.is_dir() {
                self.counts.directories += 1;
                let node = self.enter_dir(DisplayNode {
                    path,
                    kind: NodeKind::Dir,
                    parent: Some(parent),
                    depth,
                    is_last,
                });
                return Some(self.line(node));
            }

            self.counts.files += 1;
            let node = DisplayNode {
                path,
                kind: NodeKind::File,
                parent: Some(parent),
                depth,
                is_last,
            };
            return Some(self.line(node));
        }
    }
}

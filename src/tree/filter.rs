//! Exclusion filtering for tree walking

use std::path::Path;

/// Substring-based exclusion filter.
///
/// A path is excluded when any term occurs in the string form of its
/// immediate parent directory. The parent string carries every ancestor
/// component, so excluding `build` hides the contents of `build/` and of
/// anything beneath it, but also of `rebuild/` and `build-tools/`.
/// Matching is case-sensitive with no pattern syntax.
#[derive(Debug, Clone, Default)]
pub struct ExclusionFilter {
    terms: Vec<String>,
}

impl ExclusionFilter {
    pub fn new(terms: Vec<String>) -> Self {
        Self { terms }
    }

    /// Filter that includes everything.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Check if a path should be included.
    pub fn is_included(&self, path: &Path) -> bool {
        if self.terms.is_empty() {
            return true;
        }
        let Some(parent) = path.parent() else {
            return true;
        };
        let parent = parent.to_string_lossy();
        !self.terms.iter().any(|term| parent.contains(term.as_str()))
    }
}

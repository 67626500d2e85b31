//! Incremental category selection.

use serde::Serialize;
use tracing::debug;

use super::tree::{TaxonomyTree, DEFAULT_MAX_DEPTH};
use crate::error::{ConsoleError, Result};

/// The keys selected so far, one per level.
///
/// Changing the selection at level `i` drops every selection below it, the
/// same way a cascading picker resets its dependent drop-downs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxonomyPath {
    segments: Vec<String>,
    #[serde(skip)]
    max_depth: usize,
}

impl TaxonomyPath {
    pub fn new(max_depth: usize) -> Self {
        Self {
            segments: Vec::new(),
            max_depth,
        }
    }

    /// Start from existing selections, keeping at most `max_depth` of them.
    pub fn from_segments<I, S>(segments: I, max_depth: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments
                .into_iter()
                .take(max_depth)
                .map(Into::into)
                .collect(),
            max_depth,
        }
    }

    /// Select `key` at `level` (1-based) and clear all deeper levels.
    ///
    /// `level` may replace an existing selection or extend the path by one;
    /// skipping a level is an error.
    pub fn select(&mut self, level: usize, key: impl Into<String>) -> Result<()> {
        let max = self.max_depth.min(self.segments.len() + 1);
        if level == 0 || level > max {
            return Err(ConsoleError::InvalidLevel { level, max });
        }
        self.segments.truncate(level - 1);
        self.segments.push(key.into());
        Ok(())
    }

    /// Keep the first `len` selections.
    pub fn truncate(&mut self, len: usize) {
        self.segments.truncate(len);
    }

    pub fn clear(&mut self) {
        self.segments.clear();
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Every level has a selection.
    pub fn is_complete(&self) -> bool {
        self.segments.len() == self.max_depth
    }

    /// Document-store location for this selection, e.g. `PYQ/CSE/2020`.
    pub fn storage_path(&self, root: &str) -> String {
        let root = root.trim_matches('/');
        let mut parts: Vec<&str> = Vec::with_capacity(self.segments.len() + 1);
        if !root.is_empty() {
            parts.push(root);
        }
        parts.extend(self.segments.iter().map(String::as_str));
        parts.join("/")
    }

    /// Drop the first selection that no longer exists in `tree` and
    /// everything after it. Returns how many selections were removed.
    pub fn retain_valid(&mut self, tree: &TaxonomyTree) -> usize {
        let valid = (0..self.segments.len())
            .take_while(|&i| {
                tree.options_at_level(i + 1, &self.segments)
                    .iter()
                    .any(|n| n.key == self.segments[i])
            })
            .count();
        let removed = self.segments.len() - valid;
        if removed > 0 {
            debug!(kept = valid, removed, "dropping stale taxonomy selections");
            self.segments.truncate(valid);
        }
        removed
    }
}

impl Default for TaxonomyPath {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

//! Category tree built from a nested document.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::classify::{classify, DocumentNode, LeafRule};

/// Depth of the console's Year -> Branch -> Subject -> Document pickers.
pub const DEFAULT_MAX_DEPTH: usize = 4;

/// Upper bound accepted for `max_depth`.
pub const MAX_SUPPORTED_DEPTH: usize = 32;

/// Build parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonomyOptions {
    pub max_depth: usize,
    pub leaf_rule: LeafRule,
}

impl Default for TaxonomyOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            leaf_rule: LeafRule::default(),
        }
    }
}

/// One category level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxonomyNode {
    pub key: String,
    pub children: Vec<TaxonomyNode>,
}

impl TaxonomyNode {
    pub fn child(&self, key: &str) -> Option<&TaxonomyNode> {
        self.children.iter().find(|c| c.key == key)
    }

    pub fn is_terminal(&self) -> bool {
        self.children.is_empty()
    }
}

/// Immutable category tree. Safe to share between threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonomyTree {
    roots: Vec<TaxonomyNode>,
    max_depth: usize,
}

impl TaxonomyTree {
    /// Build the tree from `document`.
    ///
    /// Every object that is not leaf data becomes a node; leaves and scalars
    /// are skipped. A missing or non-object document gives an empty tree.
    pub fn build(document: &Value, opts: &TaxonomyOptions) -> Self {
        let max_depth = opts.max_depth.min(MAX_SUPPORTED_DEPTH);
        let roots = match classify(document, &opts.leaf_rule) {
            DocumentNode::Category(map) => build_level(map, opts, 1, max_depth),
            _ => Vec::new(),
        };
        debug!(roots = roots.len(), max_depth, "built taxonomy tree");
        Self { roots, max_depth }
    }

    pub fn roots(&self) -> &[TaxonomyNode] {
        &self.roots
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Valid choices at `level` (1-based) given the selections in `path`.
    ///
    /// Level 1 ignores `path`. Level `n > 1` follows `path[..n - 1]`; a
    /// missing key, a path that is too short, or a level outside
    /// `1..=max_depth` yields an empty slice.
    pub fn options_at_level(&self, level: usize, path: &[String]) -> &[TaxonomyNode] {
        if level == 0 || level > self.max_depth {
            return &[];
        }
        if level == 1 {
            return &self.roots;
        }
        match path.get(..level - 1).and_then(|prefix| self.node_at(prefix)) {
            Some(node) => &node.children[..],
            None => &[],
        }
    }

    /// The node addressed by `path`, if every segment resolves.
    pub fn node_at(&self, path: &[String]) -> Option<&TaxonomyNode> {
        let (first, rest) = path.split_first()?;
        let mut node = self.roots.iter().find(|n| &n.key == first)?;
        for key in rest {
            node = node.child(key)?;
        }
        Some(node)
    }
}

fn build_level(
    map: &Map<String, Value>,
    opts: &TaxonomyOptions,
    depth: usize,
    max_depth: usize,
) -> Vec<TaxonomyNode> {
    if depth > max_depth {
        return Vec::new();
    }
    map.iter()
        .filter_map(|(key, value)| match classify(value, &opts.leaf_rule) {
            DocumentNode::Category(children) => Some(TaxonomyNode {
                key: key.clone(),
                children: build_level(children, opts, depth + 1, max_depth),
            }),
            DocumentNode::Leaf(_) | DocumentNode::Scalar(_) => None,
        })
        .collect()
}

/// Leaf records stored directly under the category at `path`, keyed by
/// their document key. An empty path looks at the document root.
///
/// The path resolves the same way `TaxonomyTree::node_at` does: every
/// segment must name a category within `max_depth`, so records nested
/// inside a leaf are never reached.
pub fn leaves_at<'a>(
    document: &'a Value,
    path: &[String],
    opts: &TaxonomyOptions,
) -> Vec<(&'a str, &'a Map<String, Value>)> {
    if path.len() > opts.max_depth.min(MAX_SUPPORTED_DEPTH) {
        return Vec::new();
    }
    let DocumentNode::Category(mut current) = classify(document, &opts.leaf_rule) else {
        return Vec::new();
    };
    for key in path {
        match current.get(key).map(|next| classify(next, &opts.leaf_rule)) {
            Some(DocumentNode::Category(next)) => current = next,
            _ => return Vec::new(),
        }
    }
    current
        .iter()
        .filter_map(|(key, value)| match classify(value, &opts.leaf_rule) {
            DocumentNode::Leaf(record) => Some((key.as_str(), record)),
            _ => None,
        })
        .collect()
}
